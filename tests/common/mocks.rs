use async_trait::async_trait;
use sentiment_analyzer::{Error, Result, llm::GenerationClient};
use std::sync::{Arc, Mutex};

/// Canned outcome for one `generate` call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Unreachable,
    Timeout,
    Upstream(u16),
    Broken,
}

impl MockReply {
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }

    fn into_result(self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Unreachable => Err(Error::ServiceUnavailable("connection refused".to_string())),
            Self::Timeout => Err(Error::Timeout("request to Ollama timed out".to_string())),
            Self::Upstream(status) => Err(Error::Upstream {
                status,
                message: "model exploded".to_string(),
            }),
            Self::Broken => Err(Error::internal("malformed body")),
        }
    }
}

/// Mock generation client for testing
#[derive(Debug, Default)]
pub struct MockGenerationClient {
    pub replies: Arc<Mutex<Vec<MockReply>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(self, replies: Vec<MockReply>) -> Self {
        *self.replies.lock().unwrap() = replies;
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::internal("No more mock replies available"));
        }

        replies.remove(0).into_result()
    }

    fn model(&self) -> &str {
        "mock-mistral"
    }
}
