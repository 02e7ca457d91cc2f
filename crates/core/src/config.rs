//! Configuration management for Codemate.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (`.codemate/config.yaml` or `CODEMATE_CONFIG`)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Completion providers the factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["ollama", "openai"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Text-completion provider ("ollama", "openai")
    pub provider: String,

    /// Completion model identifier
    pub model: String,

    /// Custom completion endpoint
    pub endpoint: Option<String>,

    /// API key for the completion provider
    pub api_key: Option<String>,

    /// Environment variable holding the API key when `api_key` is unset
    pub api_key_env: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Append logs to this file in addition to stderr
    pub log_file: Option<PathBuf>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Retrieval engine settings
    pub retrieval: RetrievalSettings,
}

/// Retrieval engine settings (`retrieval:` section of config.yaml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalSettings {
    /// Approximate chunk bound, in characters
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Passages returned per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Split on sentence boundaries before packing (word packing otherwise)
    #[serde(default = "default_true")]
    pub sentence_detection: bool,

    /// Embedding model used for semantic ranking
    #[serde(default)]
    pub embedding: EmbeddingSettings,
}

/// Embedding model settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbeddingSettings {
    /// Provider name: "ollama", "trigram", or "none"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Custom provider endpoint
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

fn default_max_chunk_chars() -> usize {
    200
}

fn default_top_k() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            top_k: default_top_k(),
            sentence_detection: true,
            embedding: EmbeddingSettings::default(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
            endpoint: None,
            timeout_secs: None,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    logging: Option<LoggingConfig>,
    retrieval: Option<RetrievalSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
    file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            endpoint: None,
            api_key: None,
            api_key_env: None,
            log_level: None,
            log_file: None,
            verbose: false,
            no_color: false,
            retrieval: RetrievalSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `CODEMATE_CONFIG`: Path to config file
    /// - `CODEMATE_PROVIDER`: Completion provider
    /// - `CODEMATE_MODEL`: Model identifier
    /// - `CODEMATE_ENDPOINT`: Completion endpoint
    /// - `CODEMATE_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use codemate_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Provider: {}", config.provider);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], but an explicit `config_file` (the `--config`
    /// flag) takes precedence over `CODEMATE_CONFIG`.
    pub fn load_from(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file {
            config.config_file = Some(path.to_path_buf());
        } else if let Ok(config_file) = std::env::var("CODEMATE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => PathBuf::from(".codemate").join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("CODEMATE_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("CODEMATE_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("CODEMATE_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        config.api_key = std::env::var("CODEMATE_API_KEY").ok();

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
            if llm.api_key_env.is_some() {
                result.api_key_env = llm.api_key_env;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if logging.file.is_some() {
                result.log_file = logging.file;
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        log_file: Option<PathBuf>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if let Some(log_file) = log_file {
            self.log_file = Some(log_file);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the completion API key.
    ///
    /// `CODEMATE_API_KEY` wins; otherwise the variable named by `apiKeyEnv`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        self.api_key_env
            .as_deref()
            .and_then(|env_var| std::env::var(env_var).ok())
    }

    /// Validate configuration for the active provider and retrieval settings.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.retrieval.top_k == 0 {
            return Err(AppError::Config("retrieval.topK must be at least 1".to_string()));
        }

        if self.retrieval.max_chunk_chars == 0 {
            return Err(AppError::Config(
                "retrieval.maxChunkChars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.retrieval.max_chunk_chars, 200);
        assert_eq!(config.retrieval.top_k, 3);
        assert!(config.retrieval.sentence_detection);
        assert_eq!(config.retrieval.embedding.dimensions, 384);
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            Some("openai".to_string()),
            Some("gpt-4.1-nano".to_string()),
            None,
            Some(PathBuf::from("logs/backend.log")),
            true,
            false,
        );

        assert_eq!(overridden.provider, "openai");
        assert_eq!(overridden.model, "gpt-4.1-nano");
        assert_eq!(overridden.log_file, Some(PathBuf::from("logs/backend.log")));
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
llm:
  provider: openai
  model: gpt-4.1-nano
  endpoint: https://api.example.com/v1
  apiKeyEnv: EXAMPLE_API_KEY
logging:
  level: warn
  color: false
retrieval:
  maxChunkChars: 120
  topK: 5
  embedding:
    provider: trigram
    model: trigram-v1
    dimensions: 256
"#
        )
        .unwrap();

        let merged = AppConfig::default().merge_yaml(file.path()).unwrap();
        assert_eq!(merged.provider, "openai");
        assert_eq!(merged.endpoint.as_deref(), Some("https://api.example.com/v1"));
        assert_eq!(merged.api_key_env.as_deref(), Some("EXAMPLE_API_KEY"));
        assert_eq!(merged.log_level.as_deref(), Some("warn"));
        assert!(merged.no_color);
        assert_eq!(merged.retrieval.max_chunk_chars, 120);
        assert_eq!(merged.retrieval.top_k, 5);
        assert!(merged.retrieval.sentence_detection);
        assert_eq!(merged.retrieval.embedding.provider, "trigram");
        assert_eq!(merged.retrieval.embedding.dimensions, 256);
    }

    #[test]
    fn test_merge_yaml_partial_retrieval_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retrieval:\n  topK: 7\n").unwrap();

        let merged = AppConfig::default().merge_yaml(file.path()).unwrap();
        assert_eq!(merged.retrieval.top_k, 7);
        assert_eq!(merged.retrieval.max_chunk_chars, 200);
        assert_eq!(merged.retrieval.embedding, EmbeddingSettings::default());
    }

    #[test]
    fn test_merge_yaml_partial_embedding_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retrieval:\n  embedding:\n    provider: none\n").unwrap();

        let merged = AppConfig::default().merge_yaml(file.path()).unwrap();
        assert_eq!(merged.retrieval.embedding.provider, "none");
        assert_eq!(merged.retrieval.embedding.model, "all-minilm");
        assert_eq!(merged.retrieval.embedding.dimensions, 384);
        assert_eq!(merged.retrieval.top_k, 3);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retrieval:\n  maxChunkChars: 80\n").unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.config_file.as_deref(), Some(file.path()));
        assert_eq!(config.retrieval.max_chunk_chars, 80);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/codemate.yaml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retrieval: [not, a, map").unwrap();

        let result = AppConfig::default().merge_yaml(file.path());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let config = AppConfig {
            provider: "unknown".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_provider_is_case_insensitive() {
        let config = AppConfig {
            provider: "OpenAI".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_top_k() {
        let mut config = AppConfig::default();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ollama() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit() {
        let config = AppConfig {
            api_key: Some("explicit".to_string()),
            api_key_env: Some("CODEMATE_TEST_UNSET_KEY".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("explicit"));
    }
}
