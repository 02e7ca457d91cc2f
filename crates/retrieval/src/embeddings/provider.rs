//! Embedding provider trait and factory.

use crate::embeddings::config::EmbeddingConfig;
use codemate_core::{AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
///
/// A provider is loaded once and shared read-only by every retrieval call,
/// so implementations must be safe to call concurrently.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram", "ollama")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch, in input order.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Embedding("No embedding returned".to_string()))
    }
}

/// Create (load) an embedding provider based on configuration.
///
/// Loading may fail, e.g. when the Ollama model is not installed; the caller
/// decides whether that disables semantic ranking.
pub async fn create_provider(config: &EmbeddingConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    if config.dimensions == 0 {
        return Err(AppError::Config(
            "Embedding dimensions must be at least 1".to_string(),
        ));
    }

    match config.provider.as_str() {
        "trigram" => {
            let provider = super::providers::TrigramProvider::new(config.dimensions)
                .with_normalize(config.normalize);
            Ok(Arc::new(provider))
        }

        "ollama" => {
            let provider = super::providers::OllamaProvider::new(config.clone()).await?;
            Ok(Arc::new(provider))
        }

        "none" | "disabled" | "" => Err(AppError::Config(
            "Semantic ranking disabled by configuration".to_string(),
        )),

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: trigram, ollama, none",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_trigram_provider() {
        let provider = create_provider(&EmbeddingConfig::trigram(384)).await.unwrap();
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 384);
    }

    #[tokio::test]
    async fn test_create_unknown_provider() {
        let config = EmbeddingConfig {
            provider: "unknown".to_string(),
            ..EmbeddingConfig::trigram(384)
        };

        let result = create_provider(&config).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_create_disabled_provider() {
        let config = EmbeddingConfig {
            provider: "none".to_string(),
            ..EmbeddingConfig::trigram(384)
        };
        assert!(create_provider(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_zero_dimensions_rejected() {
        let result = create_provider(&EmbeddingConfig::trigram(0)).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider(&EmbeddingConfig::trigram(64)).await.unwrap();
        let embedding = provider.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), 64);
    }
}
