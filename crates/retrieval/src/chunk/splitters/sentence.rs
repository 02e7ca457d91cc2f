//! Sentence splitter using Unicode sentence boundaries.

use super::UnitSplitter;
use unicode_segmentation::UnicodeSegmentation;

/// Splits on UAX #29 sentence boundaries.
///
/// Every byte of the input lands in exactly one unit, so nothing is lost
/// before packing (unlike `unicode_sentences`, which drops punctuation-only
/// spans).
pub struct SentenceSplitter;

impl UnitSplitter for SentenceSplitter {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds().collect()
    }
}
