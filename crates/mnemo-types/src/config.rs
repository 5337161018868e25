//! Configuration types for mnemo.
//!
//! `MnemoConfig` represents the top-level `config.toml`. Every section and
//! field has a default, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MnemoConfig {
    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub embedder: EmbedderConfig,

    #[serde(default)]
    pub condenser: CondenserConfig,

    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

impl MnemoConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.memory.validate()
    }
}

/// Ingestion and retrieval parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Inputs with fewer tokens than this are stored verbatim.
    #[serde(default = "default_condense_threshold")]
    pub condense_threshold: usize,

    /// Lower output bound passed to the condenser (advisory).
    #[serde(default = "default_condense_min_length")]
    pub condense_min_length: usize,

    /// Upper output bound passed to the condenser (advisory).
    #[serde(default = "default_condense_max_length")]
    pub condense_max_length: usize,

    /// Number of results returned by `query` when no limit is given.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
}

fn default_condense_threshold() -> usize {
    30
}

fn default_condense_min_length() -> usize {
    10
}

fn default_condense_max_length() -> usize {
    30
}

fn default_top_k() -> usize {
    3
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            condense_threshold: default_condense_threshold(),
            condense_min_length: default_condense_min_length(),
            condense_max_length: default_condense_max_length(),
            default_top_k: default_top_k(),
        }
    }
}

impl MemoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.condense_threshold == 0 {
            return Err(ConfigError::Invalid(
                "memory.condense_threshold must be at least 1".into(),
            ));
        }
        if self.condense_min_length > self.condense_max_length {
            return Err(ConfigError::Invalid(format!(
                "memory.condense_min_length ({}) exceeds memory.condense_max_length ({})",
                self.condense_min_length, self.condense_max_length
            )));
        }
        if self.default_top_k == 0 {
            return Err(ConfigError::Invalid(
                "memory.default_top_k must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Local embedding model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedderConfig {
    /// Model identifier (e.g., "all-minilm-l6-v2", "bge-small-en-v1.5").
    #[serde(default = "default_embedder_model")]
    pub model: String,

    #[serde(default)]
    pub show_download_progress: bool,

    /// Where downloaded model files are cached. Library default when unset.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

fn default_embedder_model() -> String {
    "all-minilm-l6-v2".to_string()
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model: default_embedder_model(),
            show_download_progress: false,
            cache_dir: None,
        }
    }
}

/// OpenAI-compatible chat endpoint used for condensation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondenserConfig {
    #[serde(default = "default_condenser_base_url")]
    pub base_url: String,

    #[serde(default = "default_condenser_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_condenser_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_condenser_model() -> String {
    "llama3.2".to_string()
}

fn default_api_key_env() -> String {
    "MNEMO_CONDENSER_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CondenserConfig {
    fn default() -> Self {
        Self {
            base_url: default_condenser_base_url(),
            model: default_condenser_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Token accounting settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Path to a Hugging Face `tokenizer.json`. A character-based estimate is
    /// used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = MnemoConfig::default();
        assert_eq!(config.memory.condense_threshold, 30);
        assert_eq!(config.memory.condense_min_length, 10);
        assert_eq!(config.memory.condense_max_length, 30);
        assert_eq!(config.memory.default_top_k, 3);
        assert_eq!(config.embedder.model, "all-minilm-l6-v2");
        assert_eq!(config.condenser.base_url, "http://localhost:11434/v1");
        assert!(config.tokenizer.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: MnemoConfig = toml::from_str("").unwrap();
        assert_eq!(config, MnemoConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial_section() {
        let toml_str = r#"
[memory]
condense_threshold = 50

[condenser]
model = "qwen2.5:3b"
timeout_secs = 15

[tokenizer]
path = "/models/bart/tokenizer.json"
"#;
        let config: MnemoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.memory.condense_threshold, 50);
        assert_eq!(config.memory.condense_max_length, 30);
        assert_eq!(config.condenser.model, "qwen2.5:3b");
        assert_eq!(config.condenser.timeout_secs, 15);
        assert_eq!(config.condenser.api_key_env, "MNEMO_CONDENSER_API_KEY");
        assert_eq!(
            config.tokenizer.path.as_deref(),
            Some(std::path::Path::new("/models/bart/tokenizer.json"))
        );
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = MnemoConfig::default();
        config.memory.condense_min_length = 40;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("condense_min_length"));
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = MnemoConfig::default();
        config.memory.default_top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let mut config = MnemoConfig::default();
        config.memory.condense_threshold = 0;
        assert!(config.validate().is_err());
    }
}
