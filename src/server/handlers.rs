use super::types::{
    AnalyzeRequest, AnalyzeResponse, ErrorResponse, ExplainRequest, ExplainResponse,
    HealthResponse,
};
use crate::{Error, sentiment::SentimentService};
use axum::{
    async_trait,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub service: SentimentService,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// JSON body extractor whose rejections are reported as 422 `{detail}` validation errors.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                Err(validation_error(Error::validation(rejection.body_text())))
            }
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.service.model().to_string(),
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    request.validate().map_err(validation_error)?;
    info!("Received sentiment analysis request");

    match state.service.analyze(&request.text).await {
        Ok(sentiment) => Ok(Json(AnalyzeResponse { sentiment })),
        Err(e) => {
            error!("Sentiment analysis failed: {}", e);
            Err(analyze_error(&e))
        }
    }
}

pub async fn explain(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    request.validate().map_err(validation_error)?;
    info!("Received explanation request for {} sentiment", request.sentiment);

    match state.service.explain(&request.text, request.sentiment).await {
        Ok(explanation) => Ok(Json(ExplainResponse { explanation })),
        Err(e) => {
            error!("Explanation failed: {}", e);
            Err(explain_error(&e))
        }
    }
}

fn validation_error(e: Error) -> ApiError {
    api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

fn analyze_error(e: &Error) -> ApiError {
    match e {
        Error::ServiceUnavailable(_) => api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Cannot reach Ollama. Is it running?",
        ),
        Error::Timeout(_) => api_error(
            StatusCode::GATEWAY_TIMEOUT,
            "Request timed out. Try shorter input.",
        ),
        Error::Upstream { .. } => api_error(StatusCode::BAD_GATEWAY, "Error from Ollama"),
        Error::EmptyModelOutput => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Empty response from model",
        ),
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    }
}

fn explain_error(e: &Error) -> ApiError {
    match e {
        Error::Upstream { .. } => api_error(
            StatusCode::BAD_GATEWAY,
            "Error from Ollama during explanation",
        ),
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    }
}

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}
