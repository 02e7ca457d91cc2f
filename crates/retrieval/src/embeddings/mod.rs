//! Embedder: maps text to fixed-length vectors for semantic ranking.
//!
//! Providers are loaded once, then shared behind an `Arc` by every
//! retrieval call. A provider that fails to load leaves the engine in
//! lexical-only mode.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
