//! Text-completion capability for Codemate.
//!
//! This crate provides a provider-agnostic abstraction for sending a prompt to
//! a Large Language Model and getting generated text back. Ranking never
//! touches it; only document chat and the CLI do.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **OpenAI-compatible**: Any hosted `/chat/completions` API
//!
//! # Example
//! ```no_run
//! use codemate_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod usage;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiCompatibleClient};
pub use usage::log_token_usage;
