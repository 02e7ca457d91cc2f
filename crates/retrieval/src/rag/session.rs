//! Resident document state.

use serde::{Deserialize, Serialize};

/// A document loaded for chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name the text came from
    pub name: String,

    /// Extracted plain text
    pub text: String,
}

/// Holds at most one document at a time.
#[derive(Debug, Clone, Default)]
pub struct DocumentSession {
    document: Option<Document>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document, replacing any previous one.
    pub fn load(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let document = Document {
            name: name.into(),
            text: text.into(),
        };
        tracing::info!(
            "Document '{}' ready for questions ({} chars)",
            document.name,
            document.text.chars().count()
        );
        self.document = Some(document);
    }

    pub fn clear(&mut self) {
        self.document = None;
    }

    /// The resident document, if one was loaded and has text.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref().filter(|d| !d.text.is_empty())
    }
}
