//! Retrieval engine facade.
//!
//! Chunks the document, ranks chunks against the question and returns the
//! top-k as context. The engine holds no per-call state: the only shared
//! resource is the embedding provider, which is used read-only, so one
//! engine can serve concurrent callers.

use crate::chunk::{chunk_text, ChunkConfig};
use crate::embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
use crate::ranking::{lexical, semantic, RankedChunk, RankingMode};
use codemate_core::config::RetrievalSettings;
use codemate_core::{AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Returned instead of context when the document has nothing to retrieve.
pub const NO_CONTENT: &str = "No content found in document";

/// Prefix of the string returned when retrieval itself failed.
pub const ERROR_PREFIX: &str = "Error:";

/// Separator between passages in a rendered context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Default number of passages per context.
pub const DEFAULT_TOP_K: usize = 3;

/// Ranking path chosen before a call starts.
#[derive(Debug, Clone)]
pub enum RankingStrategy {
    /// Embed and rank by cosine similarity
    Semantic(Arc<dyn EmbeddingProvider>),
    /// Rank by keyword overlap
    Lexical,
}

/// Outcome of one retrieval call.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    /// The document produced no chunks
    NoContent,

    /// Ranked passages, best first
    Passages {
        passages: Vec<RankedChunk>,
        mode: RankingMode,
    },
}

impl Retrieval {
    /// Render as a prompt context: passages joined by a blank line, or the
    /// [`NO_CONTENT`] sentinel.
    pub fn context(&self) -> String {
        match self {
            Retrieval::NoContent => NO_CONTENT.to_string(),
            Retrieval::Passages { passages, .. } => passages
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(CONTEXT_SEPARATOR),
        }
    }

    pub fn mode(&self) -> Option<RankingMode> {
        match self {
            Retrieval::NoContent => None,
            Retrieval::Passages { mode, .. } => Some(*mode),
        }
    }

    pub fn passages(&self) -> &[RankedChunk] {
        match self {
            Retrieval::NoContent => &[],
            Retrieval::Passages { passages, .. } => passages,
        }
    }
}

/// Retrieval engine: chunker, optional embedder and lexical fallback.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    chunk_config: ChunkConfig,
}

impl RetrievalEngine {
    /// Engine with an already-loaded embedder, or `None` for lexical only.
    pub fn new(embedder: Option<Arc<dyn EmbeddingProvider>>, chunk_config: ChunkConfig) -> Self {
        Self {
            embedder,
            chunk_config,
        }
    }

    /// Lexical-only engine.
    pub fn lexical(chunk_config: ChunkConfig) -> Self {
        Self::new(None, chunk_config)
    }

    /// Build from configuration, loading the embedding model once.
    ///
    /// A model that fails to load is logged and leaves the engine in
    /// lexical-only mode; it never fails construction.
    pub async fn from_settings(settings: &RetrievalSettings) -> Self {
        let chunk_config = ChunkConfig::from_settings(settings);
        let embedding_config = EmbeddingConfig::from_settings(&settings.embedding);

        if embedding_config.is_disabled() {
            info!("Semantic ranking disabled, using lexical ranking only");
            return Self::lexical(chunk_config);
        }

        let embedder = match create_provider(&embedding_config).await {
            Ok(provider) => {
                info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    dimensions = provider.dimensions(),
                    "Embedding model loaded"
                );
                Some(provider)
            }
            Err(e) => {
                warn!("Embedding model unavailable, using lexical ranking: {}", e);
                None
            }
        };

        Self::new(embedder, chunk_config)
    }

    /// Drop the embedder so every call ranks lexically.
    pub fn with_lexical_only(mut self) -> Self {
        self.embedder = None;
        self
    }

    pub fn semantic_available(&self) -> bool {
        self.embedder.is_some()
    }

    /// Ranking path for the next call.
    pub fn strategy(&self) -> RankingStrategy {
        match &self.embedder {
            Some(provider) => RankingStrategy::Semantic(Arc::clone(provider)),
            None => RankingStrategy::Lexical,
        }
    }

    pub fn chunk_config(&self) -> &ChunkConfig {
        &self.chunk_config
    }

    /// Rank the document's chunks against `question` and keep the best `top_k`.
    ///
    /// An embedding failure degrades this call to lexical ranking. Any other
    /// error is returned.
    ///
    /// # Errors
    /// * `AppError::Retrieval` - If `top_k` or the chunk bound is zero
    #[instrument(skip(self, document, question), fields(doc_chars = document.len()))]
    pub async fn retrieve(&self, document: &str, question: &str, top_k: usize) -> AppResult<Retrieval> {
        if top_k == 0 {
            return Err(AppError::Retrieval("top_k must be at least 1".to_string()));
        }
        if self.chunk_config.max_chunk_chars == 0 {
            return Err(AppError::Retrieval(
                "max_chunk_chars must be at least 1".to_string(),
            ));
        }

        let chunks = chunk_text(document, &self.chunk_config);
        if chunks.is_empty() {
            debug!("Document produced no chunks");
            return Ok(Retrieval::NoContent);
        }

        match self.strategy() {
            RankingStrategy::Semantic(provider) => {
                match semantic::rank_semantic(provider.as_ref(), question, &chunks, top_k).await {
                    Ok(passages) => {
                        return Ok(Retrieval::Passages {
                            passages,
                            mode: RankingMode::Semantic,
                        })
                    }
                    Err(e) if e.is_inference_failure() => {
                        warn!("Semantic ranking failed, falling back to lexical: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
            RankingStrategy::Lexical => {
                debug!("Semantic ranking unavailable, using lexical ranking");
            }
        }

        let (passages, mode) = lexical::select(document, question, &chunks, top_k);
        Ok(Retrieval::Passages { passages, mode })
    }

    /// Context string for a question about `document`.
    ///
    /// Never fails: returns the joined passages, the [`NO_CONTENT`] sentinel,
    /// or a message starting with [`ERROR_PREFIX`].
    pub async fn get_context(&self, document: &str, question: &str, top_k: usize) -> String {
        match self.retrieve(document, question, top_k).await {
            Ok(retrieval) => retrieval.context(),
            Err(e) => {
                error!("Retrieval failed: {}", e);
                format!("{} {}", ERROR_PREFIX, e)
            }
        }
    }

    /// [`RetrievalEngine::get_context`] with [`DEFAULT_TOP_K`] passages.
    pub async fn get_default_context(&self, document: &str, question: &str) -> String {
        self.get_context(document, question, DEFAULT_TOP_K).await
    }
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::lexical(ChunkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;

    #[test]
    fn test_context_joins_in_rank_order() {
        let retrieval = Retrieval::Passages {
            passages: vec![
                RankedChunk {
                    index: 2,
                    text: "second chunk".to_string(),
                    score: 0.9,
                },
                RankedChunk {
                    index: 0,
                    text: "first chunk".to_string(),
                    score: 0.1,
                },
            ],
            mode: RankingMode::Semantic,
        };

        assert_eq!(retrieval.context(), "second chunk\n\nfirst chunk");
        assert_eq!(retrieval.mode(), Some(RankingMode::Semantic));
    }

    #[test]
    fn test_no_content_renders_sentinel() {
        assert_eq!(Retrieval::NoContent.context(), NO_CONTENT);
        assert!(Retrieval::NoContent.passages().is_empty());
    }

    #[test]
    fn test_strategy_follows_embedder() {
        let engine = RetrievalEngine::new(
            Some(Arc::new(TrigramProvider::new(64))),
            ChunkConfig::default(),
        );
        assert!(engine.semantic_available());
        assert!(matches!(engine.strategy(), RankingStrategy::Semantic(_)));

        let engine = engine.with_lexical_only();
        assert!(!engine.semantic_available());
        assert!(matches!(engine.strategy(), RankingStrategy::Lexical));
    }

    #[tokio::test]
    async fn test_from_settings_disabled_embedding() {
        let mut settings = RetrievalSettings::default();
        settings.embedding.provider = "none".to_string();
        settings.max_chunk_chars = 50;

        let engine = RetrievalEngine::from_settings(&settings).await;
        assert!(!engine.semantic_available());
        assert_eq!(engine.chunk_config().max_chunk_chars, 50);
    }

    #[tokio::test]
    async fn test_from_settings_trigram_embedding() {
        let mut settings = RetrievalSettings::default();
        settings.embedding.provider = "trigram".to_string();
        settings.embedding.dimensions = 128;

        let engine = RetrievalEngine::from_settings(&settings).await;
        assert!(engine.semantic_available());
    }

    #[tokio::test]
    async fn test_from_settings_unloadable_model_degrades() {
        let mut settings = RetrievalSettings::default();
        settings.embedding.endpoint = Some("http://127.0.0.1:9".to_string());
        settings.embedding.timeout_secs = Some(1);

        let engine = RetrievalEngine::from_settings(&settings).await;
        assert!(!engine.semantic_available());
    }

    #[tokio::test]
    async fn test_zero_top_k_is_an_error() {
        let engine = RetrievalEngine::default();

        let result = engine.retrieve("Some text.", "text", 0).await;
        assert!(matches!(result, Err(AppError::Retrieval(_))));

        let context = engine.get_context("Some text.", "text", 0).await;
        assert!(context.starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_default_context_uses_default_top_k() {
        let engine = RetrievalEngine::lexical(ChunkConfig::with_max_chars(10));
        let document = "One a. Two b. Three c. Four d. Five e.";

        let context = engine.get_default_context(document, "none of these").await;
        assert_eq!(context.split(CONTEXT_SEPARATOR).count(), DEFAULT_TOP_K);
        assert_eq!(context, engine.get_context(document, "none of these", 3).await);
    }

    #[tokio::test]
    async fn test_zero_chunk_bound_is_an_error() {
        let engine = RetrievalEngine::lexical(ChunkConfig::with_max_chars(0));

        let context = engine.get_context("Some text.", "text", 3).await;
        assert!(context.starts_with(ERROR_PREFIX));
    }
}
