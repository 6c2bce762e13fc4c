//! Outbound client for the Ollama inference server

mod client;

pub use client::{build_http_client, OllamaClient};

/// Outcome of a failed call to Ollama
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// No status came back: refused connection, DNS failure, timeout
    #[error("request to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Ollama answered with a non-success status
    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// Success status, but the body was not what the protocol promises
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Connect { source, .. } if source.is_timeout())
    }
}
