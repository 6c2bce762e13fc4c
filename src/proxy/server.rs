//! Router assembly and the listening server

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handler::{chat_handler, demo_handler, health_handler, info_handler, models_handler};
use super::openapi::ApiDoc;
use crate::config::AppConfig;
use crate::ollama::{build_http_client, OllamaClient};
use crate::service::ShowcaseService;

/// Shared state for the handlers; everything in it is immutable
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<ShowcaseService>,
}

impl AppState {
    /// Wire the Ollama client and service from a finished configuration
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let ollama = OllamaClient::new(build_http_client()?, config.ollama.base_url());
        let service = Arc::new(ShowcaseService::new(config.clone(), ollama));
        Ok(Self { config, service })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.server.max_body_bytes);

    Router::new()
        .route("/", get(info_handler))
        .route("/health", get(health_handler))
        .route("/models", get(models_handler))
        .route("/chat", post(chat_handler).layer(body_limit))
        .route("/demo", get(demo_handler))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the showcase server until it fails
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let ollama_url = config.ollama.base_url().to_string();
    let default_model = config.ollama.default_model.clone();

    let app = build_router(AppState::from_config(config)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("ai-showcase listening on {}", addr);
    tracing::info!(default_model = %default_model, "Proxying to Ollama at {}", ollama_url);

    Ok(axum::serve(listener, app).await?)
}
