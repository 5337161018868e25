//! Token accounting for the condensation threshold.
//!
//! The threshold is expressed in the condenser's token unit, so the counter
//! should come from the same tokenizer family as the condenser. When no
//! tokenizer is available, [`EstimatedTokenCounter`] falls back to the
//! ~4 characters per token heuristic.

/// Counts tokens in a piece of text.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;
}

/// Character-based estimate: one token per 4 characters, rounded up.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTokenCounter;

impl EstimatedTokenCounter {
    const CHARS_PER_TOKEN: f64 = 4.0;
}

impl TokenCounter for EstimatedTokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        let chars = text.chars().count();
        (chars as f64 / Self::CHARS_PER_TOKEN).ceil() as usize
    }
}
