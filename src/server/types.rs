use crate::{Error, Result, sentiment::Sentiment};
use serde::{Deserialize, Serialize};

pub const MAX_TEXT_CHARS: usize = 2000;
pub const MIN_ANALYZE_CHARS: usize = 3;
pub const MIN_EXPLAIN_CHARS: usize = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub text: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<()> {
        check_length(&self.text, MIN_ANALYZE_CHARS, MAX_TEXT_CHARS)
    }
}

impl ExplainRequest {
    pub fn validate(&self) -> Result<()> {
        check_length(&self.text, MIN_EXPLAIN_CHARS, MAX_TEXT_CHARS)
    }
}

fn check_length(text: &str, min: usize, max: usize) -> Result<()> {
    let len = text.chars().count();
    if len < min {
        return Err(Error::validation(format!(
            "text must be at least {} characters, got {}",
            min, len
        )));
    }
    if len > max {
        return Err(Error::validation(format!(
            "text must be at most {} characters, got {}",
            max, len
        )));
    }
    Ok(())
}
