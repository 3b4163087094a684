use super::mocks::MockGenerationClient;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sentiment_analyzer::{
    config::{Config, FrontendConfig, LlmConfig},
    sentiment::SentimentService,
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        llm: LlmConfig {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 5,
        },
        ..Config::default()
    }
}

/// Frontend settings pointing at `backend_url` with short deadlines.
pub fn frontend_config(backend_url: &str) -> FrontendConfig {
    FrontendConfig {
        backend_url: backend_url.to_string(),
        analyze_timeout_secs: 2,
        explain_timeout_secs: 2,
        ..FrontendConfig::default()
    }
}

/// Backend router over a shared mock client
pub fn backend_app(client: Arc<MockGenerationClient>) -> Router {
    server::router(AppState {
        service: SentimentService::new(client),
    })
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A local URL with nothing listening on it.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "0.0.0.0"
  port: 9000
  logs:
    level: "debug"
  cors_origins:
    - "http://localhost:3000"

llm:
  base_url: "http://ollama:11434"
  model: "llama3"
  timeout_secs: 45

frontend:
  port: 9501
  backend_url: "http://api:9000"
  analyze_timeout_secs: 40
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
