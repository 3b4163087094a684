pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    config::{Config, ServerConfig},
    llm::OllamaClient,
    sentiment::SentimentService,
};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let client = OllamaClient::new(config.llm.clone());
    info!(
        "Using model '{}' at {} (timeout {}s)",
        config.llm.model, config.llm.base_url, config.llm.timeout_secs
    );

    let app_state = AppState {
        service: SentimentService::new(Arc::new(client)),
    };

    let app = app(app_state, &config.server)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting sentiment API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze/", post(handlers::analyze))
        .route("/analyze", post(handlers::analyze))
        .route("/explain/", post(handlers::explain))
        .route("/explain", post(handlers::explain))
        .with_state(state)
}

/// Routes wrapped in CORS and request tracing.
pub fn app(state: AppState, server: &ServerConfig) -> Result<Router> {
    Ok(router(state)
        .layer(cors_layer(&server.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
