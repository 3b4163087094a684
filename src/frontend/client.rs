use crate::{
    Error, Result,
    config::FrontendConfig,
    sentiment::Sentiment,
    server::types::{
        AnalyzeRequest, AnalyzeResponse, ErrorResponse, ExplainRequest, ExplainResponse,
    },
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the sentiment API.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    analyze_timeout: Duration,
    explain_timeout: Duration,
}

impl BackendClient {
    pub fn new(config: &FrontendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            analyze_timeout: config.analyze_timeout(),
            explain_timeout: config.explain_timeout(),
        }
    }

    pub async fn analyze(&self, text: &str) -> Result<Sentiment> {
        let request = AnalyzeRequest {
            text: text.to_string(),
        };
        let response: AnalyzeResponse = self
            .post("/analyze/", &request, self.analyze_timeout)
            .await?;
        Ok(response.sentiment)
    }

    pub async fn explain(&self, text: &str, sentiment: Sentiment) -> Result<String> {
        let request = ExplainRequest {
            text: text.to_string(),
            sentiment,
        };
        let response: ExplainResponse = self
            .post("/explain/", &request, self.explain_timeout)
            .await?;
        Ok(response.explanation)
    }

    async fn post<B, R>(&self, path: &str, body: &B, timeout: Duration) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, "sentiment API"))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.detail)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                Error::from_transport(e, "sentiment API")
            } else {
                Error::internal(format!("unexpected response from {}: {}", url, e))
            }
        })
    }
}
