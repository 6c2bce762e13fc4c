//! ai-showcase: HTTP front end for a local Ollama server
//!
//! Features:
//! - Chat relay to Ollama's non-streaming generate API, with optional context lines
//! - Health check that degrades instead of failing
//! - Model listing
//! - Static info and demo payloads

pub mod api;
pub mod config;
pub mod error;
pub mod ollama;
pub mod proxy;
pub mod service;

#[cfg(test)]
mod test_support;

pub use config::AppConfig;
pub use error::ApiError;
pub use proxy::{build_router, run_server, AppState};
pub use service::ShowcaseService;
