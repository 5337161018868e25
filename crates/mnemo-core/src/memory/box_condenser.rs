//! BoxCondenser -- object-safe dynamic dispatch wrapper for Condenser.
//!
//! Same blanket-impl pattern as [`super::box_embedder::BoxEmbedder`].

use std::future::Future;
use std::pin::Pin;

use mnemo_types::error::CollaboratorError;

use super::condenser::Condenser;

/// Object-safe version of [`Condenser`] with boxed futures.
pub trait CondenserDyn: Send + Sync {
    fn condense_boxed<'a>(
        &'a self,
        text: &'a str,
        min_length: usize,
        max_length: usize,
    ) -> Pin<Box<dyn Future<Output = Result<String, CollaboratorError>> + Send + 'a>>;

    fn name_dyn(&self) -> &str;
}

impl<T: Condenser> CondenserDyn for T {
    fn condense_boxed<'a>(
        &'a self,
        text: &'a str,
        min_length: usize,
        max_length: usize,
    ) -> Pin<Box<dyn Future<Output = Result<String, CollaboratorError>> + Send + 'a>> {
        Box::pin(self.condense(text, min_length, max_length))
    }

    fn name_dyn(&self) -> &str {
        self.name()
    }
}

/// Type-erased condenser for runtime selection.
pub struct BoxCondenser {
    inner: Box<dyn CondenserDyn + Send + Sync>,
}

impl BoxCondenser {
    pub fn new<T: Condenser + 'static>(condenser: T) -> Self {
        Self {
            inner: Box::new(condenser),
        }
    }

    /// Condense `text` to roughly `min_length..=max_length` tokens.
    pub async fn condense(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, CollaboratorError> {
        self.inner.condense_boxed(text, min_length, max_length).await
    }

    pub fn name(&self) -> &str {
        self.inner.name_dyn()
    }
}
