//! Command handlers for the Codemate CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chunk;
pub mod context;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chunk::ChunkCommand;
pub use context::ContextCommand;

use anyhow::Context;
use std::path::Path;

/// Read a plain-text document. Extraction from PDF/DOCX happens upstream.
pub(crate) fn read_document(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))
}

/// Display name for a document path.
pub(crate) fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
