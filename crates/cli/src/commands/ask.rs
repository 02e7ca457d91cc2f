//! Ask command handler.
//!
//! Answers a question about a document with retrieval-augmented generation.

use super::context::build_engine;
use super::{document_name, read_document};
use clap::Args;
use codemate_core::{config::AppConfig, AppError};
use codemate_llm::create_client;
use codemate_retrieval::{DocumentChat, DocumentSession};
use std::path::PathBuf;

/// Ask a question about a document
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Plain-text document to answer from
    pub file: PathBuf,

    /// The question to ask
    pub question: String,

    /// Number of passages to use as context
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Skip the embedding model and rank by keyword overlap
    #[arg(long)]
    pub lexical: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let mut session = DocumentSession::new();
        session.load(document_name(&self.file), read_document(&self.file)?);

        let api_key = config.resolve_api_key();
        let client = create_client(&config.provider, config.endpoint.as_deref(), api_key.as_deref())
            .map_err(AppError::Config)?;

        let engine = build_engine(config, self.lexical).await;
        let top_k = self.top_k.unwrap_or(config.retrieval.top_k);
        let chat = DocumentChat::new(engine, client, &config.model, top_k);

        let answer = chat.ask(&session, &self.question).await?;

        if self.json {
            let output = serde_json::json!({
                "answer": answer.answer,
                "model": config.model,
                "provider": config.provider,
                "mode": answer.mode,
                "context": answer.context,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer.answer);
        }

        Ok(())
    }
}
