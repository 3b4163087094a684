use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_frontend_port")]
    pub port: u16,
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_analyze_timeout_secs")]
    pub analyze_timeout_secs: u64,
    #[serde(default = "default_explain_timeout_secs")]
    pub explain_timeout_secs: u64,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default)]
    pub logs: LogsConfig,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FrontendConfig {
    pub fn analyze_timeout(&self) -> Duration {
        Duration::from_secs(self.analyze_timeout_secs)
    }

    pub fn explain_timeout(&self) -> Duration {
        Duration::from_secs(self.explain_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_model(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_frontend_port(),
            backend_url: default_backend_url(),
            analyze_timeout_secs: default_analyze_timeout_secs(),
            explain_timeout_secs: default_explain_timeout_secs(),
            session_ttl_secs: default_session_ttl_secs(),
            logs: LogsConfig::default(),
        }
    }
}

fn default_llm_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_frontend_port() -> u16 {
    8501
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:8501".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_analyze_timeout_secs() -> u64 {
    35
}

fn default_explain_timeout_secs() -> u64 {
    30
}

fn default_session_ttl_secs() -> u64 {
    3600
}
