//! In-test providers with controlled behavior.

use crate::embeddings::EmbeddingProvider;
use async_trait::async_trait;
use codemate_core::{AppError, AppResult};
use codemate_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Embeds text as keyword presence flags, one dimension per keyword.
#[derive(Debug)]
pub struct KeywordProvider {
    keywords: Vec<&'static str>,
}

impl KeywordProvider {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordProvider {
    fn provider_name(&self) -> &str {
        "keyword"
    }

    fn model_name(&self) -> &str {
        "keyword-test"
    }

    fn dimensions(&self) -> usize {
        self.keywords.len()
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                self.keywords
                    .iter()
                    .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect())
    }
}

/// Fails every inference call.
#[derive(Debug, Default)]
pub struct FailingProvider {
    pub calls: AtomicUsize,
}

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    fn provider_name(&self) -> &str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-test"
    }

    fn dimensions(&self) -> usize {
        8
    }

    async fn embed_batch(&self, _texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Embedding("inference crashed".to_string()))
    }
}

/// Embeds questions (text ending in '?') with one dimension fewer than chunks.
#[derive(Debug)]
pub struct WrongDimensionProvider;

#[async_trait]
impl EmbeddingProvider for WrongDimensionProvider {
    fn provider_name(&self) -> &str {
        "wrong-dimension"
    }

    fn model_name(&self) -> &str {
        "wrong-dimension-test"
    }

    fn dimensions(&self) -> usize {
        4
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let dims = if text.ends_with('?') { 3 } else { 4 };
                vec![1.0; dims]
            })
            .collect())
    }
}

/// Completion client that records prompts and echoes a fixed answer.
#[derive(Default)]
pub struct RecordingLlm {
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for RecordingLlm {
    fn provider_name(&self) -> &str {
        "recording"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        Ok(LlmResponse {
            content: "Cats and dogs.".to_string(),
            model: request.model.clone(),
            usage: LlmUsage::new(42, 3),
        })
    }
}

/// Completion client that always fails.
pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    fn provider_name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
        Err(AppError::Llm("service unavailable".to_string()))
    }
}
