use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

/// Prompt in, generated text out.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;
}

pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            model: config.model,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        debug!(
            "Sending generate request to {} ({} prompt chars)",
            self.base_url,
            prompt.len()
        );

        let response = self
            .client
            .post(self.generate_url())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, "Ollama"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Ollama error {}: {}", status.as_u16(), body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                Error::from_transport(e, "Ollama")
            } else {
                Error::internal(format!("Failed to parse Ollama response: {}", e))
            }
        })?;

        debug!("Received {} chars from Ollama", body.response.len());
        Ok(body.response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
