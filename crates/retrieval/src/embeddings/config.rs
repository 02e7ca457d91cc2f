//! Embedding provider configuration.

use codemate_core::config::EmbeddingSettings;
use serde::{Deserialize, Serialize};

/// Embedding configuration for the retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "ollama", "trigram", "none"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Whether to normalize embeddings to unit length
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// Custom provider endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_normalize() -> bool {
    true
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::from_settings(&EmbeddingSettings::default())
    }
}

impl EmbeddingConfig {
    /// Build from the `retrieval.embedding` section of the app config.
    pub fn from_settings(settings: &EmbeddingSettings) -> Self {
        Self {
            provider: settings.provider.clone(),
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            normalize: true,
            endpoint: settings.endpoint.clone(),
            timeout_secs: settings.timeout_secs,
        }
    }

    /// Offline trigram config with the given dimensions.
    pub fn trigram(dimensions: usize) -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions,
            normalize: true,
            endpoint: None,
            timeout_secs: None,
        }
    }

    /// Whether semantic ranking was switched off in configuration.
    pub fn is_disabled(&self) -> bool {
        matches!(self.provider.as_str(), "none" | "disabled" | "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "all-minilm");
        assert_eq!(config.dimensions, 384);
        assert!(config.normalize);
        assert!(!config.is_disabled());
    }

    #[test]
    fn test_from_settings() {
        let settings = EmbeddingSettings {
            provider: "none".to_string(),
            model: "unused".to_string(),
            dimensions: 16,
            endpoint: Some("http://gpu-box:11434".to_string()),
            timeout_secs: Some(5),
        };

        let config = EmbeddingConfig::from_settings(&settings);
        assert!(config.is_disabled());
        assert_eq!(config.endpoint.as_deref(), Some("http://gpu-box:11434"));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_trigram_config() {
        let config = EmbeddingConfig::trigram(128);
        assert_eq!(config.provider, "trigram");
        assert_eq!(config.dimensions, 128);
    }
}
