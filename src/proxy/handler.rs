//! Route handlers and the validating chat extractor

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    Json,
};

use super::server::AppState;
use crate::api::{ChatRequest, ChatResponse, HealthStatus, ModelsList};
use crate::error::{ApiError, ErrorBody};

/// A chat request that parsed and passed validation
///
/// Rejection happens before the handler runs, so a bad body never reaches Ollama.
#[derive(Debug)]
pub struct ValidChat(pub ChatRequest);

#[async_trait]
impl<S> FromRequest<S> for ValidChat
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, status = %e.status(), "Failed to read chat request body");
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(e.body_text())
            } else {
                ApiError::Validation(e.body_text())
            }
        })?;

        let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(error = %e, "Rejected malformed chat request");
            ApiError::Validation(format!("invalid chat request: {}", e))
        })?;
        request.validate()?;

        Ok(ValidChat(request))
    }
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Info",
    responses(
        (status = 200, description = "API name, version and endpoint map"),
    )
)]
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.service.info())
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Ollama connectivity; degraded rather than failing", body = HealthStatus),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.service.health().await)
}

/// GET /models
#[utoipa::path(
    get,
    path = "/models",
    tag = "Models",
    responses(
        (status = 200, description = "Installed models and the default", body = ModelsList),
        (status = 503, description = "Ollama unreachable or failing", body = ErrorBody),
    )
)]
pub async fn models_handler(State(state): State<AppState>) -> Result<Json<ModelsList>, ApiError> {
    state.service.list_models().await.map(Json)
}

/// POST /chat
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer from the resolved model", body = ChatResponse),
        (status = 413, description = "Request body too large", body = ErrorBody),
        (status = 422, description = "Malformed request or empty message", body = ErrorBody),
        (status = 500, description = "Unexpected failure", body = ErrorBody),
        (status = 503, description = "Ollama unreachable", body = ErrorBody),
    )
)]
pub async fn chat_handler(
    State(state): State<AppState>,
    ValidChat(request): ValidChat,
) -> Result<Json<ChatResponse>, ApiError> {
    state.service.chat(&request).await.map(Json)
}

/// GET /demo
#[utoipa::path(
    get,
    path = "/demo",
    tag = "Info",
    responses(
        (status = 200, description = "Feature list, stack and usage examples"),
    )
)]
pub async fn demo_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.service.demo())
}
