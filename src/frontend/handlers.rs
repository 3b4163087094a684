use super::{
    client::BackendClient,
    session::{SessionContext, SessionHandle, SessionStore},
    view::{PageView, render_page},
};
use crate::{Error, server::types::MIN_ANALYZE_CHARS};
use axum::{
    extract::{Form, State},
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sentiment_session";

#[derive(Clone)]
pub struct UiState {
    pub backend: Arc<BackendClient>,
    pub sessions: Arc<SessionStore>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
}

pub async fn index(State(state): State<UiState>, headers: HeaderMap) -> Response {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut ctx = session.context.lock().await;

    if ctx.needs_explanation() {
        fetch_explanation(&state.backend, &mut ctx).await;
    }

    let notice = ctx.take_notice();
    let html = render_page(&PageView {
        input_text: &ctx.input_text,
        sentiment: ctx.sentiment_result,
        explanation: ctx.explanation.as_deref(),
        notice: notice.as_deref(),
        can_clear: ctx.can_clear(),
    });
    drop(ctx);

    with_session_cookie(Html(html), &session)
}

pub async fn analyze(
    State(state): State<UiState>,
    headers: HeaderMap,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut ctx = session.context.lock().await;

    let text = form.text.trim();
    ctx.set_input(text);

    if text.is_empty() {
        ctx.set_notice("Please enter text to analyze.");
    } else if text.chars().count() < MIN_ANALYZE_CHARS {
        ctx.set_notice("Text too short. Enter at least 3 characters.");
    } else {
        run_analysis(&state.backend, &mut ctx, text).await;
    }
    drop(ctx);

    with_session_cookie(Redirect::to("/"), &session)
}

pub async fn clear(State(state): State<UiState>, headers: HeaderMap) -> Response {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    {
        let mut ctx = session.context.lock().await;
        if let Err(e) = ctx.clear() {
            warn!("Failed to clear session {}: {}", session.id, e);
        }
    }

    with_session_cookie(Redirect::to("/"), &session)
}

async fn run_analysis(backend: &BackendClient, ctx: &mut SessionContext, text: &str) {
    if let Err(e) = ctx.begin_analysis(text) {
        error!("Cannot start analysis: {}", e);
        return;
    }

    let outcome = match backend.analyze(text).await {
        Ok(sentiment) => {
            info!("Backend classified input as {}", sentiment);
            ctx.record_sentiment(sentiment)
        }
        Err(e) => {
            warn!("Analysis request failed: {}", e);
            ctx.record_failure(analysis_failure_message(&e))
        }
    };

    if let Err(e) = outcome {
        error!("Session update after analysis failed: {}", e);
    }
}

async fn fetch_explanation(backend: &BackendClient, ctx: &mut SessionContext) {
    let Some(sentiment) = ctx.sentiment_result else {
        return;
    };

    let explanation = match backend.explain(&ctx.input_text, sentiment).await {
        Ok(explanation) => explanation,
        Err(e) => {
            warn!("Explanation request failed: {}", e);
            explanation_failure_message(&e).to_string()
        }
    };

    if let Err(e) = ctx.record_explanation(explanation) {
        error!("Session update after explanation failed: {}", e);
    }
}

pub fn analysis_failure_message(e: &Error) -> String {
    match e {
        Error::ServiceUnavailable(_) => {
            "Cannot connect to backend. Is the API server running?".to_string()
        }
        Error::Timeout(_) => "Request timed out. Try shorter text.".to_string(),
        Error::Upstream { message, .. } => format!("Failed: {}", message),
        other => format!("Error: {}", other),
    }
}

pub fn explanation_failure_message(e: &Error) -> &'static str {
    match e {
        Error::Upstream { .. } => "Could not generate explanation.",
        _ => "Could not connect to explanation service.",
    }
}

/// Reads the session id out of the `Cookie` header, if present and well formed.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

fn with_session_cookie(response: impl IntoResponse, session: &SessionHandle) -> Response {
    let mut response = response.into_response();
    if session.created {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session.id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
