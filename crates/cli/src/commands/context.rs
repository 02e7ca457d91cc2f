//! Context command handler.
//!
//! Prints the retrieval context a question would be answered from.

use super::read_document;
use clap::Args;
use codemate_core::config::AppConfig;
use codemate_retrieval::RetrievalEngine;
use std::path::PathBuf;

/// Retrieve the most relevant passages of a document for a question
#[derive(Args, Debug)]
pub struct ContextCommand {
    /// Plain-text document to search
    pub file: PathBuf,

    /// The question to retrieve context for
    pub question: String,

    /// Number of passages to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Skip the embedding model and rank by keyword overlap
    #[arg(long)]
    pub lexical: bool,

    /// Output ranked passages as JSON
    #[arg(long)]
    pub json: bool,
}

impl ContextCommand {
    /// Execute the context command.
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing context command");

        let document = read_document(&self.file)?;
        let top_k = self.top_k.unwrap_or(config.retrieval.top_k);
        let engine = build_engine(config, self.lexical).await;

        if self.json {
            let retrieval = engine.retrieve(&document, &self.question, top_k).await?;
            let output = serde_json::json!({
                "question": self.question,
                "mode": retrieval.mode(),
                "passages": retrieval.passages(),
                "context": retrieval.context(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", engine.get_context(&document, &self.question, top_k).await);
        }

        Ok(())
    }
}

/// Build the engine from config, skipping the embedding model when `lexical`.
pub(crate) async fn build_engine(config: &AppConfig, lexical: bool) -> RetrievalEngine {
    if lexical {
        tracing::debug!("Lexical ranking forced by --lexical");
        let mut settings = config.retrieval.clone();
        settings.embedding.provider = "none".to_string();
        return RetrievalEngine::from_settings(&settings).await;
    }
    RetrievalEngine::from_settings(&config.retrieval).await
}
