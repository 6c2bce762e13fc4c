//! Request and response types of the showcase API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// Body of `POST /chat`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
    /// Lines prepended to the prompt as background for the question
    #[serde(default)]
    pub context: Option<Vec<String>>,
}

impl ChatRequest {
    /// Reject requests that deserialized but carry nothing to ask
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.message.is_empty() {
            return Err(ApiError::Validation(
                "field 'message' must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    /// The model named by the request, or `default` when absent or empty
    pub fn resolve_model<'a>(&'a self, default: &'a str) -> &'a str {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => model,
            _ => default,
        }
    }

    /// The prompt sent upstream for this request
    pub fn prompt(&self) -> String {
        build_prompt(&self.message, self.context.as_deref())
    }
}

/// Prefix the question with its context lines, if there are any
pub fn build_prompt(message: &str, context: Option<&[String]>) -> String {
    match context {
        Some(lines) if !lines.is_empty() => {
            format!(
                "Context:\n{}\n\nQuestion: {}\n\nAnswer:",
                lines.join("\n"),
                message
            )
        }
        _ => message.to_string(),
    }
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    /// The resolved model the answer came from
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: HealthState,
    pub ollama_connected: bool,
    pub model: String,
}

impl HealthStatus {
    /// Status is derived from connectivity so the two can't disagree
    pub fn new(ollama_connected: bool, model: impl Into<String>) -> Self {
        let status = if ollama_connected {
            HealthState::Healthy
        } else {
            HealthState::Degraded
        };
        Self {
            status,
            ollama_connected,
            model: model.into(),
        }
    }
}

/// Response of `GET /models`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ModelsList {
    pub models: Vec<String>,
    pub default: String,
}
