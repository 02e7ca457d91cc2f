//! Word splitter, used when sentence detection is turned off.

use super::UnitSplitter;

/// Splits on whitespace. May cut a sentence in half.
pub struct WordSplitter;

impl UnitSplitter for WordSplitter {
    fn name(&self) -> &'static str {
        "word"
    }

    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_splitter() {
        let units = WordSplitter.split("  alpha beta\n\tgamma  ");
        assert_eq!(units, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_word_splitter_whitespace_only() {
        assert!(WordSplitter.split(" \n\t ").is_empty());
    }
}
