//! Application state: effective configuration and memory store wiring.
//!
//! `AppState` pins the generic collaborator traits to concrete infra
//! implementations. Loading the configuration is cheap; building the store
//! may load an embedding model, so it only happens for commands that need it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use mnemo_core::memory::box_condenser::BoxCondenser;
use mnemo_core::memory::box_embedder::BoxEmbedder;
use mnemo_core::memory::store::MemoryStore;
use mnemo_infra::config::{load_config, load_config_file, resolve_data_dir};
use mnemo_infra::llm::condenser::OpenAiCondenser;
use mnemo_infra::llm::lead::LeadSentenceCondenser;
use mnemo_infra::tokenizer::build_token_counter;
use mnemo_infra::vector::embedder::FastEmbedEmbedder;
use mnemo_infra::vector::hashing::HashingEmbedder;
use mnemo_types::config::MnemoConfig;

/// Shared state for CLI commands.
pub struct AppState {
    pub config: MnemoConfig,
    /// File the configuration was read from, or would be read from.
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub offline: bool,
}

impl AppState {
    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist and parse; the data-directory file is
    /// optional and falls back to defaults.
    pub async fn init(explicit_config: Option<&Path>, offline: bool) -> Result<Self> {
        let data_dir = resolve_data_dir();

        let (config, config_path) = match explicit_config {
            Some(path) => {
                let config = load_config_file(path)
                    .await
                    .with_context(|| format!("Failed to load configuration {}", path.display()))?;
                (config, path.to_path_buf())
            }
            None => (load_config(&data_dir).await, data_dir.join("config.toml")),
        };

        Ok(Self {
            config,
            config_path,
            data_dir,
            offline,
        })
    }

    /// Build an empty memory store over the configured collaborators.
    pub async fn build_store(&self, show_progress: bool) -> Result<MemoryStore> {
        let tokens = build_token_counter(&self.config.tokenizer)
            .context("Failed to initialize the token counter")?;

        let (embedder, condenser) = if self.offline {
            (
                BoxEmbedder::new(HashingEmbedder::default()),
                BoxCondenser::new(LeadSentenceCondenser::new(Arc::clone(&tokens))),
            )
        } else {
            let spinner = if show_progress {
                ProgressBar::new_spinner()
            } else {
                ProgressBar::hidden()
            };
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
            spinner.set_message(format!("Loading {}...", self.config.embedder.model));
            spinner.enable_steady_tick(std::time::Duration::from_millis(80));

            let embedder_config = self.config.embedder.clone();
            let loaded =
                tokio::task::spawn_blocking(move || FastEmbedEmbedder::new(&embedder_config))
                    .await
                    .context("Embedding model loader panicked")?;
            spinner.finish_and_clear();

            let embedder = loaded.context("Failed to load the embedding model")?;
            if threshold_uses_estimate(&self.config, self.offline) {
                tracing::warn!(
                    condenser = %self.config.condenser.model,
                    "tokenizer.path is not set; the condensation threshold is measured \
                     with a chars/4 estimate instead of the condenser's tokenizer"
                );
            }
            (
                BoxEmbedder::new(embedder),
                BoxCondenser::new(OpenAiCondenser::from_config(&self.config.condenser)),
            )
        };

        Ok(MemoryStore::new(
            embedder,
            condenser,
            tokens,
            self.config.memory.clone(),
        ))
    }

    /// Result limit for a query: the explicit `k`, else `memory.default_top_k`.
    pub fn top_k(&self, k: Option<usize>) -> usize {
        k.unwrap_or(self.config.memory.default_top_k)
    }
}

/// Whether the online condenser is paired with the character estimate rather
/// than a tokenizer in its own unit.
fn threshold_uses_estimate(config: &MnemoConfig, offline: bool) -> bool {
    !offline && config.tokenizer.path.is_none()
}
