use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Empty response from model")]
    EmptyModelOutput,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classifies a transport-level `reqwest` failure against `target`.
    ///
    /// Connection failures become `ServiceUnavailable` and expired deadlines become
    /// `Timeout`; everything else is `Internal`.
    pub fn from_transport(err: reqwest::Error, target: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("request to {} timed out", target))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("cannot connect to {}: {}", target, err))
        } else {
            Self::Internal(format!("request to {} failed: {}", target, err))
        }
    }
}
