mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`), then applies
/// environment overrides.
///
/// A missing `config.yaml` falls back to built-in defaults; an explicitly set
/// `CONFIG_PATH` that cannot be read is an error.
pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await?,
        Err(_) => {
            if tokio::fs::try_exists(DEFAULT_CONFIG_PATH).await? {
                load_from(DEFAULT_CONFIG_PATH).await?
            } else {
                debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                Config::default()
            }
        }
    };

    if let Ok(url) = env::var("OLLAMA_BASE_URL") {
        config.llm.base_url = url;
    }
    if let Ok(url) = env::var("SENTIMENT_API_URL") {
        config.frontend.backend_url = url;
    }

    Ok(config)
}

pub async fn load_from(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::config(format!("cannot read {}: {}", path, e)))?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
