//! Condenser trait for shortening long text before it is stored.
//!
//! Implementations (OpenAI-compatible chat endpoint, offline lead-sentence
//! extraction) live in mnemo-infra.

use mnemo_types::error::CollaboratorError;

/// Trait for condensing text while keeping its salient meaning.
///
/// `min_length` and `max_length` are output bounds in the condenser's token
/// unit. They are advisory: a model may return text outside them.
pub trait Condenser: Send + Sync {
    fn condense(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> impl std::future::Future<Output = Result<String, CollaboratorError>> + Send;

    /// Human-readable backend name (e.g., "openai-compat", "lead-sentence").
    fn name(&self) -> &str;
}
