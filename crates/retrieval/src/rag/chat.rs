//! Retrieval-augmented answering over the resident document.

use crate::engine::{Retrieval, RetrievalEngine, NO_CONTENT};
use crate::rag::session::DocumentSession;
use crate::ranking::RankingMode;
use codemate_core::{AppError, AppResult};
use codemate_llm::{log_token_usage, LlmClient, LlmRequest};
use serde::Serialize;
use std::sync::Arc;

/// Characters of context shown in debug logs.
const CONTEXT_PREVIEW_CHARS: usize = 500;

/// Sampling temperature for chat answers.
const CHAT_TEMPERATURE: f32 = 0.7;

/// Answer to one document question.
#[derive(Debug, Clone, Serialize)]
pub struct ChatAnswer {
    /// Generated answer, or the no-content sentinel
    pub answer: String,

    /// Context the answer was generated from
    pub context: String,

    /// Ranking path used; `None` when the document had no content
    pub mode: Option<RankingMode>,
}

/// Prompt handed to the completion provider.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!("Context:\n{}\n\nQuestion: {}", context, question)
}

/// Answers questions about the session's document.
pub struct DocumentChat {
    engine: RetrievalEngine,
    client: Arc<dyn LlmClient>,
    model: String,
    top_k: usize,
}

impl DocumentChat {
    pub fn new(engine: RetrievalEngine, client: Arc<dyn LlmClient>, model: impl Into<String>, top_k: usize) -> Self {
        Self {
            engine,
            client,
            model: model.into(),
            top_k,
        }
    }

    /// Answer `question` from the resident document.
    ///
    /// # Errors
    /// * `AppError::Retrieval` - If no document is loaded
    /// * `AppError::Llm` - If the completion provider fails
    pub async fn ask(&self, session: &DocumentSession, question: &str) -> AppResult<ChatAnswer> {
        let document = session
            .document()
            .ok_or_else(|| AppError::Retrieval("No document uploaded for RAG".to_string()))?;

        tracing::info!("Document question received for '{}': {}", document.name, question);

        let retrieval = self.engine.retrieve(&document.text, question, self.top_k).await?;
        if retrieval == Retrieval::NoContent {
            tracing::info!("Document '{}' has no retrievable content", document.name);
            return Ok(ChatAnswer {
                answer: NO_CONTENT.to_string(),
                context: NO_CONTENT.to_string(),
                mode: None,
            });
        }

        let context = retrieval.context();
        tracing::debug!(
            "Context used ({}):\n{}...",
            self.client.provider_name(),
            context.chars().take(CONTEXT_PREVIEW_CHARS).collect::<String>()
        );

        let request = LlmRequest::new(build_prompt(&context, question), &self.model)
            .with_temperature(CHAT_TEMPERATURE);
        let response = self.client.complete(&request).await?;
        log_token_usage(&response.model, &response.usage);

        Ok(ChatAnswer {
            answer: response.content,
            context,
            mode: retrieval.mode(),
        })
    }
}
