//! Wire types: the showcase API surface and the Ollama upstream protocol

mod ollama;
mod showcase;

pub use ollama::*;
pub use showcase::*;
