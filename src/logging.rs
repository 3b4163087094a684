use crate::{Error, Result};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<()> {
    level.parse::<LevelFilter>().map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        ))
    })?;
    Ok(())
}

/// Installs the JSON subscriber. `RUST_LOG` overrides `configured_level`.
pub fn init(configured_level: &str) -> Result<String> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured_level.to_string());

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            validate_log_level(&log_level)?;
            EnvFilter::new(&log_level)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .map_err(|e| Error::internal(format!("failed to install tracing subscriber: {}", e)))?;

    Ok(log_level)
}
