//! Lexical fallback ranking by keyword overlap.
//!
//! Score is the raw size of the intersection between the question's and the
//! chunk's lowercase word sets. It is not normalized by length, so longer
//! chunks are favored.

use super::{order_by_score, take_top, RankedChunk, RankingMode};
use std::collections::HashSet;

/// Characters of raw document returned when there are no chunks to rank.
pub const RAW_DOCUMENT_PREFIX_CHARS: usize = 1000;

/// Lowercase, whitespace-delimited word set. Punctuation stays attached.
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Score every chunk against the query, best first.
pub fn rank_lexical(query: &str, chunks: &[String]) -> Vec<(usize, f32)> {
    let query_words = word_set(query);

    let mut scored: Vec<(usize, f32)> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let overlap = word_set(chunk).intersection(&query_words).count();
            (i, overlap as f32)
        })
        .collect();

    order_by_score(&mut scored);
    scored
}

/// Select up to `top_k` chunks by keyword overlap.
///
/// With no chunks at all, the first [`RAW_DOCUMENT_PREFIX_CHARS`] characters
/// of `document` come back as a single passage instead.
pub fn select(document: &str, question: &str, chunks: &[String], top_k: usize) -> (Vec<RankedChunk>, RankingMode) {
    if chunks.is_empty() {
        let prefix: String = document.chars().take(RAW_DOCUMENT_PREFIX_CHARS).collect();
        let passage = RankedChunk {
            index: 0,
            text: prefix,
            score: 0.0,
        };
        return (vec![passage], RankingMode::RawDocument);
    }

    let scored = rank_lexical(question, chunks);
    (take_top(&scored, chunks, top_k), RankingMode::Lexical)
}
