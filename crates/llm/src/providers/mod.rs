//! Completion provider implementations.

mod ollama;
mod openai;

pub use ollama::OllamaClient;
pub use openai::OpenAiCompatibleClient;
