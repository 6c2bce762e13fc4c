//! The showcase operations, independent of HTTP routing

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ChatRequest, ChatResponse, GenerateRequest, HealthStatus, ModelsList};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::ollama::{OllamaClient, UpstreamError};

const MODELS_UNAVAILABLE: &str = "Ollama service unavailable";
const MODELS_UNREACHABLE: &str = "Cannot connect to Ollama service";
const CHAT_UNREACHABLE: &str = "Cannot connect to Ollama service. Make sure Ollama is running.";

pub struct ShowcaseService {
    config: Arc<AppConfig>,
    ollama: OllamaClient,
}

impl ShowcaseService {
    pub fn new(config: Arc<AppConfig>, ollama: OllamaClient) -> Self {
        Self { config, ollama }
    }

    pub fn default_model(&self) -> &str {
        &self.config.ollama.default_model
    }

    /// API name, version and endpoint map
    pub fn info(&self) -> serde_json::Value {
        serde_json::json!({
            "message": "AI Showcase API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health",
                "chat": "/chat",
                "models": "/models",
                "demo": "/demo",
                "docs": "/docs"
            }
        })
    }

    /// Probe Ollama. Failures degrade the status instead of erroring.
    pub async fn health(&self) -> HealthStatus {
        let timeout = Duration::from_secs(self.config.ollama.health_timeout_seconds);

        let connected = match self.ollama.tags(timeout).await {
            Ok(_) => true,
            // A success status with an odd body still means Ollama is up
            Err(UpstreamError::Decode { url, reason }) => {
                tracing::warn!(url = %url, reason = %reason, "Ollama health probe returned unexpected body");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Ollama connection error");
                false
            }
        };

        HealthStatus::new(connected, self.default_model())
    }

    /// Names of the models installed on Ollama
    pub async fn list_models(&self) -> Result<ModelsList, ApiError> {
        let timeout = Duration::from_secs(self.config.ollama.models_timeout_seconds);

        match self.ollama.tags(timeout).await {
            Ok(tags) => Ok(ModelsList {
                models: tags.names(),
                default: self.default_model().to_string(),
            }),
            Err(e @ UpstreamError::Connect { .. }) => {
                if e.is_timeout() {
                    tracing::error!(error = %e, "Timed out listing Ollama models");
                } else {
                    tracing::error!(error = %e, "Error connecting to Ollama");
                }
                Err(ApiError::ServiceUnavailable(MODELS_UNREACHABLE.to_string()))
            }
            // Any upstream status maps to 503
            Err(e) => {
                tracing::error!(error = %e, "Ollama failed to list models");
                Err(ApiError::ServiceUnavailable(MODELS_UNAVAILABLE.to_string()))
            }
        }
    }

    /// Forward one question to Ollama and relay the answer
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let model = request.resolve_model(self.default_model());
        let prompt = request.prompt();
        let timeout = Duration::from_secs(self.config.ollama.chat_timeout_seconds);

        tracing::info!(
            model = %model,
            context_lines = request.context.as_ref().map_or(0, Vec::len),
            "→ chat"
        );

        let body = GenerateRequest::non_streaming(model, prompt);
        match self.ollama.generate(&body, timeout).await {
            Ok(result) => {
                tracing::info!(model = %model, tokens = ?result.eval_count, "← chat");
                Ok(ChatResponse {
                    response: result.response.unwrap_or_default(),
                    model: model.to_string(),
                    tokens_used: result.eval_count,
                })
            }
            Err(UpstreamError::Status { url, status, body: error_body }) => {
                tracing::error!(url = %url, status, error_body = %error_body, "Ollama returned error response");
                Err(ApiError::Upstream {
                    status,
                    message: format!("Ollama API error: {}", error_body),
                })
            }
            Err(e @ UpstreamError::Connect { .. }) => {
                if e.is_timeout() {
                    tracing::error!(error = %e, timeout_secs = timeout.as_secs(), "Timed out waiting for Ollama");
                } else {
                    tracing::error!(error = %e, "Error calling Ollama");
                }
                Err(ApiError::ServiceUnavailable(CHAT_UNREACHABLE.to_string()))
            }
            Err(UpstreamError::Decode { url, reason }) => {
                tracing::error!(url = %url, reason = %reason, "Unexpected response from Ollama");
                Err(ApiError::Internal(format!("unexpected response from Ollama: {}", reason)))
            }
        }
    }

    /// Feature list, stack description and usage examples
    pub fn demo(&self) -> serde_json::Value {
        let port = self.config.server.port;
        serde_json::json!({
            "description": "AI Showcase Application",
            "features": [
                "Local LLM integration via Ollama",
                "Async Rust web service on axum and tokio",
                "RESTful API design",
                "Health checks and monitoring",
                "Structured logging with tracing",
                "Single static binary deployment"
            ],
            "tech_stack": {
                "backend": "Rust",
                "framework": "axum",
                "http_client": "reqwest",
                "llm": "Ollama (local)",
                "default_model": self.default_model()
            },
            "usage": {
                "start_server": "ai-showcase run",
                "health_check": format!("curl http://localhost:{}/health", port),
                "chat_example": format!(
                    "curl -X POST http://localhost:{}/chat -H 'Content-Type: application/json' -d '{{\"message\": \"Hello!\"}}'",
                    port
                )
            }
        })
    }
}
