use anyhow::Result;
use sentiment_analyzer::{config, frontend, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match logging::init(&config.frontend.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Starting sentiment UI with log level: {}", log_level);

    frontend::run(config).await?;

    Ok(())
}
