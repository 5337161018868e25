//! Hugging Face tokenizer-backed token counting.

use std::path::Path;
use std::sync::Arc;

use mnemo_core::memory::tokens::{EstimatedTokenCounter, TokenCounter};
use mnemo_types::config::TokenizerConfig;
use mnemo_types::error::CollaboratorError;

/// Counts tokens with a `tokenizer.json` loaded from disk.
pub struct HfTokenCounter {
    tokenizer: tokenizers::Tokenizer,
}

impl HfTokenCounter {
    pub fn from_file(path: &Path) -> Result<Self, CollaboratorError> {
        let tokenizer = tokenizers::Tokenizer::from_file(path).map_err(|e| {
            CollaboratorError::Model(format!(
                "failed to load tokenizer from {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self { tokenizer })
    }
}

impl TokenCounter for HfTokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        match self.tokenizer.encode(text, false) {
            Ok(encoding) => encoding.get_ids().len(),
            Err(e) => {
                tracing::warn!(error = %e, "tokenizer failed, falling back to estimate");
                EstimatedTokenCounter.count_tokens(text)
            }
        }
    }
}

/// Build the token counter named by configuration.
///
/// Uses the configured `tokenizer.json` when set, the character estimate
/// otherwise.
pub fn build_token_counter(
    config: &TokenizerConfig,
) -> Result<Arc<dyn TokenCounter>, CollaboratorError> {
    match &config.path {
        Some(path) => {
            let counter = HfTokenCounter::from_file(path)?;
            tracing::debug!(path = %path.display(), "tokenizer loaded");
            Ok(Arc::new(counter))
        }
        None => Ok(Arc::new(EstimatedTokenCounter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Minimal word-level tokenizer: whitespace pre-tokenizer and a small vocab.
    const WORD_LEVEL_TOKENIZER: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": { "[UNK]": 0, "the": 1, "cat": 2, "sat": 3 },
    "unk_token": "[UNK]"
  }
}"#;

    #[test]
    fn test_default_config_uses_estimate() {
        let counter = build_token_counter(&TokenizerConfig::default()).unwrap();
        assert_eq!(counter.count_tokens("abcdefgh"), 2);
    }

    #[test]
    fn test_missing_tokenizer_file_is_error() {
        let config = TokenizerConfig {
            path: Some("/nonexistent/tokenizer.json".into()),
        };
        let err = build_token_counter(&config).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/tokenizer.json"));
    }

    #[test]
    fn test_word_level_tokenizer_counts_words() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tokenizer.json");
        std::fs::write(&path, WORD_LEVEL_TOKENIZER).unwrap();

        let counter = build_token_counter(&TokenizerConfig { path: Some(path) }).unwrap();
        assert_eq!(counter.count_tokens("the cat sat"), 3);
        // Unknown words map to [UNK] but still count.
        assert_eq!(counter.count_tokens("the dog sat down"), 4);
    }
}
