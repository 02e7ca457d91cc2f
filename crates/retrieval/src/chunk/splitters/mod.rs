//! Unit splitters: break a document into the units the packer joins.

mod sentence;
mod word;

pub use sentence::SentenceSplitter;
pub use word::WordSplitter;

/// Trait for unit splitters.
pub trait UnitSplitter {
    /// Name recorded in logs ("sentence" | "word").
    fn name(&self) -> &'static str;

    /// Split text into units, in document order. Units may carry surrounding
    /// whitespace; the packer trims them and drops the empty ones.
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}
