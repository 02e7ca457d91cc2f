//! Chunk command handler.
//!
//! Prints the chunks a document splits into.

use super::read_document;
use clap::Args;
use codemate_core::config::AppConfig;
use codemate_retrieval::{chunk_text, ChunkConfig, Granularity};
use std::path::PathBuf;

/// Split a document into retrieval chunks
#[derive(Args, Debug)]
pub struct ChunkCommand {
    /// Plain-text document to split
    pub file: PathBuf,

    /// Approximate maximum chunk length in characters
    #[arg(long)]
    pub max_chunk_chars: Option<usize>,

    /// Pack whitespace-delimited words instead of sentences
    #[arg(long)]
    pub words: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChunkCommand {
    /// Execute the chunk command.
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing chunk command");

        let text = read_document(&self.file)?;
        let chunk_config = self.chunk_config(config);
        anyhow::ensure!(chunk_config.max_chunk_chars > 0, "--max-chunk-chars must be at least 1");

        let chunks = chunk_text(&text, &chunk_config);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        } else if chunks.is_empty() {
            println!("No chunks: document is empty");
        } else {
            for (i, chunk) in chunks.iter().enumerate() {
                println!("[{}] ({} chars) {}", i, chunk.chars().count(), chunk);
            }
        }

        Ok(())
    }

    fn chunk_config(&self, config: &AppConfig) -> ChunkConfig {
        let mut chunk_config = ChunkConfig::from_settings(&config.retrieval);
        if let Some(max) = self.max_chunk_chars {
            chunk_config.max_chunk_chars = max;
        }
        if self.words {
            chunk_config.granularity = Granularity::Word;
        }
        chunk_config
    }
}
