//! Codemate CLI
//!
//! Main entry point for the codemate command-line tool.
//! Chats with a plain-text document using retrieval-augmented generation.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChunkCommand, ContextCommand};
use codemate_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// Codemate CLI - chat with a document using retrieval-augmented generation
#[derive(Parser, Debug)]
#[command(name = "codemate")]
#[command(about = "Chat with a document using retrieval-augmented generation", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "CODEMATE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level or filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Completion provider (ollama, openai)
    #[arg(short, long, global = true, env = "CODEMATE_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "CODEMATE_MODEL")]
    model: Option<String>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a document into retrieval chunks
    Chunk(ChunkCommand),

    /// Retrieve the passages most relevant to a question
    Context(ContextCommand),

    /// Ask a question about a document
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load_from(cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.log_file,
        cli.verbose,
        cli.no_color,
    );
    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(
        config.log_level.as_deref(),
        config.no_color,
        config.log_file.as_deref(),
    )?;

    tracing::info!("Codemate CLI starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Chunk(_) => "chunk",
        Commands::Context(_) => "context",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Chunk(cmd) => cmd.execute(&config).await,
        Commands::Context(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_context_command() {
        let cli = Cli::try_parse_from([
            "codemate",
            "context",
            "notes.txt",
            "What is ownership?",
            "-k",
            "5",
            "--lexical",
        ])
        .unwrap();

        match cli.command {
            Commands::Context(cmd) => {
                assert_eq!(cmd.file, PathBuf::from("notes.txt"));
                assert_eq!(cmd.top_k, Some(5));
                assert!(cmd.lexical);
                assert!(!cmd.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["codemate", "chunk", "notes.txt", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}
