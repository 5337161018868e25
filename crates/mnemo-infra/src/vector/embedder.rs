//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `mnemo-core` using fastembed's ONNX
//! runtime inference. The default model is AllMiniLML6V2 (384 dimensions).
//!
//! `TextEmbedding::embed` needs exclusive access and is CPU bound, so the
//! model sits behind a `Mutex` and every call runs on the blocking pool.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use mnemo_core::memory::embedder::Embedder;
use mnemo_types::config::EmbedderConfig;
use mnemo_types::error::CollaboratorError;

/// Output dimension of the default model.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Map a configured model name to a fastembed model and its output dimension.
fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize), CollaboratorError> {
    match name.to_lowercase().as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, EMBEDDING_DIMENSION)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        other => Err(CollaboratorError::Model(format!(
            "unsupported embedding model '{other}'"
        ))),
    }
}

/// Local sentence embedder.
pub struct FastEmbedEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedEmbedder {
    /// Load (downloading on first use) the configured model.
    pub fn new(config: &EmbedderConfig) -> Result<Self, CollaboratorError> {
        let (model, dimension) = resolve_model(&config.model)?;

        let mut options =
            InitOptions::new(model).with_show_download_progress(config.show_download_progress);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let embedding = TextEmbedding::try_new(options).map_err(|e| {
            CollaboratorError::Model(format!("failed to load '{}': {e}", config.model))
        })?;

        tracing::info!(model = %config.model, dimension, "embedding model loaded");

        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            model_name: config.model.to_lowercase(),
            dimension,
        })
    }
}

impl Embedder for FastEmbedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CollaboratorError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| CollaboratorError::Model("embedding model lock poisoned".into()))?;
            model
                .embed(texts, None)
                .map_err(|e| CollaboratorError::Model(e.to_string()))
        })
        .await
        .map_err(|e| CollaboratorError::Model(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
