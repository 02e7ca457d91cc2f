//! Document chunking.
//!
//! Splits raw text into bounded, trimmed chunks in document order:
//! - Sentence units first (UAX #29 boundaries) when sentence detection is on
//! - Whitespace-delimited words otherwise
//! - Units are greedily packed up to `max_chunk_chars` characters
//!
//! Chunking is pure and deterministic.

mod packing;
pub mod splitters;

use codemate_core::config::RetrievalSettings;
use serde::{Deserialize, Serialize};
use splitters::{SentenceSplitter, UnitSplitter, WordSplitter};

/// Default chunk bound, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 200;

/// Unit a chunk is packed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Sentence boundaries
    Sentence,
    /// Whitespace-delimited words
    Word,
}

/// Configuration for chunking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Approximate maximum chunk length in characters
    pub max_chunk_chars: usize,

    /// Unit chunks are packed from
    pub granularity: Granularity,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            granularity: Granularity::Sentence,
        }
    }
}

impl ChunkConfig {
    /// Sentence-granularity config with the given bound.
    pub fn with_max_chars(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars,
            ..Self::default()
        }
    }

    /// Build from the `retrieval` section of the app config.
    pub fn from_settings(settings: &RetrievalSettings) -> Self {
        Self {
            max_chunk_chars: settings.max_chunk_chars,
            granularity: if settings.sentence_detection {
                Granularity::Sentence
            } else {
                Granularity::Word
            },
        }
    }

    fn splitter(&self) -> Box<dyn UnitSplitter> {
        match self.granularity {
            Granularity::Sentence => Box::new(SentenceSplitter),
            Granularity::Word => Box::new(WordSplitter),
        }
    }
}

/// Split `text` into non-empty, trimmed chunks.
///
/// Empty or whitespace-only text yields no chunks.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let splitter = config.splitter();
    let units = splitter.split(text);
    let chunks = packing::pack_units(units, config.max_chunk_chars);

    tracing::debug!(
        "Chunked {} chars into {} chunks (splitter: {}, max_chunk_chars: {})",
        text.chars().count(),
        chunks.len(),
        splitter.name(),
        config.max_chunk_chars
    );

    chunks
}
