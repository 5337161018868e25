//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding text into fixed-length vectors.
//! Implementations (fastembed, hashing stub) live in mnemo-infra.

use mnemo_types::error::CollaboratorError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into vectors.
    ///
    /// Returns one vector per input text, in input order.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, CollaboratorError>> + Send;

    /// The model name used for embeddings (e.g., "all-minilm-l6-v2").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors. Fixed for the embedder's lifetime.
    fn dimension(&self) -> usize;
}
