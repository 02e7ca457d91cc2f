//! Embedding provider implementations.

mod ollama;
mod trigram;

pub use ollama::OllamaProvider;
pub use trigram::TrigramProvider;
