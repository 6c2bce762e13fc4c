//! HTTP server

mod handler;
mod openapi;
pub mod server;

pub use handler::ValidChat;
pub use openapi::ApiDoc;
pub use server::{build_router, run_server, AppState};
