//! Error types for Codemate.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, completion, embedding,
//! and retrieval errors.

use thiserror::Error;

/// Unified error type for Codemate.
///
/// All fallible library functions return `Result<T, AppError>`.
/// Retrieval degrades instead of failing, but the failures it degrades from
/// are still represented here so they can be logged and matched on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text-completion provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding model load or inference errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Retrieval and document chat errors
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error came out of an embedding model.
    ///
    /// Only these errors are absorbed by the semantic ranking path; anything
    /// else is a bug and must surface.
    pub fn is_inference_failure(&self) -> bool {
        matches!(self, AppError::Embedding(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_failure_classification() {
        assert!(AppError::Embedding("model crashed".to_string()).is_inference_failure());
        assert!(!AppError::Config("bad".to_string()).is_inference_failure());
        assert!(!AppError::Retrieval("bad".to_string()).is_inference_failure());
    }

    #[test]
    fn test_yaml_error_conversion() {
        let err = serde_yaml::from_str::<Vec<u32>>("not: [a list").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Serialization(_)));
    }

    #[test]
    fn test_display_prefixes() {
        let err = AppError::Embedding("dimension mismatch".to_string());
        assert_eq!(err.to_string(), "Embedding error: dimension mismatch");
    }
}
