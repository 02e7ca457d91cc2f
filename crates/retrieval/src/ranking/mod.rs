//! Chunk ranking.
//!
//! Two interchangeable paths produce the same [`RankedChunk`] shape:
//! - [`semantic`]: cosine similarity between embedded chunks and the question
//! - [`lexical`]: keyword overlap, used when no embedder is available or it fails

pub mod lexical;
pub mod semantic;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A chunk selected for the context, with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedChunk {
    /// Position of the chunk in document order
    pub index: usize,

    /// Chunk text
    pub text: String,

    /// Cosine similarity (semantic) or word overlap count (lexical)
    pub score: f32,
}

/// Ranking path that produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Embedding similarity
    Semantic,
    /// Keyword overlap
    Lexical,
    /// Document prefix, returned when there was nothing to rank
    RawDocument,
}

impl std::fmt::Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RankingMode::Semantic => "semantic",
            RankingMode::Lexical => "lexical",
            RankingMode::RawDocument => "raw_document",
        };
        f.write_str(name)
    }
}

/// Order `(index, score)` pairs best first.
///
/// The sort is stable: equal scores keep their input (document) order.
/// `-0.0` and `0.0` compare equal.
pub(crate) fn order_by_score(scored: &mut [(usize, f32)]) {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
}

/// Materialize the first `top_k` scored indices as ranked chunks.
pub(crate) fn take_top(scored: &[(usize, f32)], chunks: &[String], top_k: usize) -> Vec<RankedChunk> {
    scored
        .iter()
        .take(top_k)
        .map(|&(index, score)| RankedChunk {
            index,
            text: chunks[index].clone(),
            score,
        })
        .collect()
}
