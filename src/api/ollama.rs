//! Ollama REST API types (the subset this proxy consumes)

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GenerateRequest {
    /// Build a non-streaming generation request
    pub fn non_streaming(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Non-streaming response of `POST /api/generate`
///
/// Ollama sends many more fields (model, timings, context, done_reason);
/// only the ones the proxy relays are kept.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
    /// Number of tokens in the generated response
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Response of `GET /api/tags`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

impl TagsResponse {
    /// Model names in upstream order, empty string for entries without a name
    pub fn names(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|m| m.name.clone().unwrap_or_default())
            .collect()
    }
}

/// A locally installed model; size, digest and details are ignored
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelEntry {
    #[serde(default)]
    pub name: Option<String>,
}
