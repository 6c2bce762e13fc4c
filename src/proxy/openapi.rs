//! OpenAPI document served under /docs

use utoipa::OpenApi;

use super::handler;
use crate::api::{ChatRequest, ChatResponse, HealthState, HealthStatus, ModelsList};
use crate::error::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Showcase",
        description = "Chat, health and model listing on top of a local Ollama server",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handler::info_handler,
        handler::health_handler,
        handler::models_handler,
        handler::chat_handler,
        handler::demo_handler,
    ),
    components(schemas(
        ChatRequest,
        ChatResponse,
        HealthState,
        HealthStatus,
        ModelsList,
        ErrorBody,
    )),
    tags(
        (name = "Info", description = "Static information"),
        (name = "Health", description = "Ollama connectivity"),
        (name = "Models", description = "Installed models"),
        (name = "Chat", description = "Questions relayed to Ollama"),
    )
)]
pub struct ApiDoc;
