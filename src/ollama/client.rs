use serde::de::DeserializeOwned;
use std::time::Duration;

use super::UpstreamError;
use crate::api::{GenerateRequest, GenerateResponse, TagsResponse};

/// Build the pooled HTTP client shared by every request
///
/// No client-wide timeout is set; each call carries its own.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .connect_timeout(Duration::from_secs(5))
        .build()
}

/// Thin typed wrapper over the two Ollama endpoints the proxy uses
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/tags`: locally installed models
    pub async fn tags(&self, timeout: Duration) -> Result<TagsResponse, UpstreamError> {
        let url = format!("{}/api/tags", self.base_url);
        tracing::debug!(url = %url, timeout_secs = timeout.as_secs(), "Listing Ollama models");

        let request = self.http_client.get(&url).timeout(timeout);
        Self::execute(request, url).await
    }

    /// `POST /api/generate` with a non-streaming request
    pub async fn generate(
        &self,
        body: &GenerateRequest,
        timeout: Duration,
    ) -> Result<GenerateResponse, UpstreamError> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::debug!(
            url = %url,
            model = %body.model,
            prompt_len = body.prompt.len(),
            timeout_secs = timeout.as_secs(),
            "Calling Ollama generate"
        );

        let request = self.http_client.post(&url).json(body).timeout(timeout);
        Self::execute(request, url).await
    }

    /// Send a request and sort the outcome into success or one [`UpstreamError`] kind
    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<T, UpstreamError> {
        let response = match request.send().await {
            Ok(resp) => resp,
            Err(source) => return Err(UpstreamError::Connect { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Failed to read upstream error body");
                String::new()
            });
            return Err(UpstreamError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => return Err(UpstreamError::Connect { url, source }),
        };

        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}
