//! Browser UI: a server-rendered form that drives the analyze then explain flow.

mod client;
pub mod handlers;
pub mod session;
pub mod view;

pub use client::BackendClient;
pub use handlers::UiState;
pub use session::{SessionContext, SessionEvent, SessionState, SessionStore};

use crate::{Result, config::Config};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let frontend = &config.frontend;
    info!("Using sentiment API at {}", frontend.backend_url);

    let state = UiState {
        backend: Arc::new(BackendClient::new(frontend)),
        sessions: Arc::new(SessionStore::new(frontend.session_ttl())),
    };

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(frontend.host.parse()?, frontend.port);

    info!("Starting sentiment UI on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: UiState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze))
        .route("/clear", post(handlers::clear))
        .with_state(state)
}
