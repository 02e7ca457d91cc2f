//! Retrieval engine for document chat.
//!
//! Turns one document and one question into prompt context:
//! chunking, semantic ranking with a lexical fallback, and top-k selection.

pub mod chunk;
pub mod embeddings;
pub mod engine;
pub mod rag;
pub mod ranking;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use chunk::{chunk_text, ChunkConfig, Granularity};
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use engine::{
    RankingStrategy, Retrieval, RetrievalEngine, CONTEXT_SEPARATOR, DEFAULT_TOP_K, ERROR_PREFIX,
    NO_CONTENT,
};
pub use rag::{ChatAnswer, DocumentChat, DocumentSession};
pub use ranking::{RankedChunk, RankingMode};
