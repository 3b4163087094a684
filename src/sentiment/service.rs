use super::{
    label::{Sentiment, normalize_label},
    prompt::{classification_prompt, explanation_prompt, first_sentence},
};
use crate::{Error, Result, llm::GenerationClient};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const EXPLANATION_UNREACHABLE: &str = "Could not generate explanation (Ollama not reachable).";
pub const EXPLANATION_TIMED_OUT: &str = "Explanation generation timed out.";
pub const EXPLANATION_FAILED: &str = "Could not generate explanation.";

/// Classifies and explains text through a generation client.
///
/// Holds no per-request state; one instance is shared by every handler.
#[derive(Clone)]
pub struct SentimentService {
    client: Arc<dyn GenerationClient>,
}

impl SentimentService {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub async fn analyze(&self, text: &str) -> Result<Sentiment> {
        let prompt = classification_prompt(text.trim());

        let raw = self.client.generate(&prompt).await?;
        let sentiment = normalize_label(&raw)?;

        info!("Sentiment: {}", sentiment);
        Ok(sentiment)
    }

    /// Explains `sentiment` for `text` in one sentence.
    ///
    /// Only an upstream error status is returned as `Err`. Connection failures,
    /// timeouts and other errors degrade to a fixed fallback sentence.
    pub async fn explain(&self, text: &str, sentiment: Sentiment) -> Result<String> {
        let prompt = explanation_prompt(text.trim(), sentiment);

        match self.client.generate(&prompt).await {
            Ok(raw) => {
                let explanation = first_sentence(&raw);
                info!("Generated explanation successfully");
                Ok(explanation)
            }
            Err(err @ Error::Upstream { .. }) => Err(err),
            Err(Error::ServiceUnavailable(msg)) => {
                error!("Cannot connect to Ollama for explanation: {}", msg);
                Ok(EXPLANATION_UNREACHABLE.to_string())
            }
            Err(Error::Timeout(msg)) => {
                error!("Explanation request timed out: {}", msg);
                Ok(EXPLANATION_TIMED_OUT.to_string())
            }
            Err(e) => {
                warn!("Unexpected error during explanation: {}", e);
                Ok(EXPLANATION_FAILED.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct ScriptedClient {
        reply: Mutex<Option<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(reply: Result<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(Error::internal("no scripted reply")))
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_analyze_trims_text_before_prompting() {
        let client = ScriptedClient::new(Ok("Positive".to_string()));
        let service = SentimentService::new(client.clone());

        let sentiment = service.analyze("   I love this!  ").await.unwrap();

        assert_eq!(sentiment, Sentiment::Positive);
        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"\"\"\nI love this!\n\"\"\""));
    }

    #[tokio::test]
    async fn test_analyze_propagates_empty_output() {
        let service = SentimentService::new(ScriptedClient::new(Ok("  ".to_string())));
        assert!(matches!(
            service.analyze("hello there").await,
            Err(Error::EmptyModelOutput)
        ));
    }

    #[tokio::test]
    async fn test_analyze_propagates_transport_errors() {
        let service = SentimentService::new(ScriptedClient::new(Err(Error::Timeout(
            "slow".to_string(),
        ))));
        assert!(matches!(
            service.analyze("hello there").await,
            Err(Error::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_explain_soft_failures() {
        let cases = [
            (
                Error::ServiceUnavailable("refused".to_string()),
                EXPLANATION_UNREACHABLE,
            ),
            (Error::Timeout("slow".to_string()), EXPLANATION_TIMED_OUT),
            (Error::internal("boom"), EXPLANATION_FAILED),
        ];

        for (err, expected) in cases {
            let service = SentimentService::new(ScriptedClient::new(Err(err)));
            let explanation = service.explain("text", Sentiment::Neutral).await.unwrap();
            assert_eq!(explanation, expected);
        }
    }

    #[tokio::test]
    async fn test_explain_upstream_status_is_hard_error() {
        let service = SentimentService::new(ScriptedClient::new(Err(Error::Upstream {
            status: 500,
            message: "oops".to_string(),
        })));
        assert!(matches!(
            service.explain("text", Sentiment::Positive).await,
            Err(Error::Upstream { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_explain_keeps_first_sentence() {
        let client = ScriptedClient::new(Ok("Great tone. Extra clause here.".to_string()));
        let service = SentimentService::new(client.clone());

        let explanation = service
            .explain(" I love this! ", Sentiment::Positive)
            .await
            .unwrap();

        assert_eq!(explanation, "Great tone.");
        assert!(client.prompts.lock().unwrap()[0].contains("considered Positive in sentiment"));
    }
}
