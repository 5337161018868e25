//! Memory types for mnemo.
//!
//! A memory is a piece of generated text, stored verbatim when short and in
//! condensed form when long, together with the ordinal it was assigned at
//! insertion. The ordinal doubles as the row of its vector in the index.

use serde::{Deserialize, Serialize};

/// A single stored memory item.
///
/// `ordinal` is the insertion position (starting at 0) and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub ordinal: usize,
    /// The stored textual form: the original text or its condensed form.
    pub text: String,
    pub vector: Vec<f32>,
}

/// A stored text without its vector, as exposed to callers listing the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredText {
    pub ordinal: usize,
    pub text: String,
}

/// One hit returned by a vector index search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub ordinal: usize,
    /// Squared L2 distance to the query vector.
    pub distance: f32,
}

/// A search hit resolved back to its stored text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMemory {
    pub ordinal: usize,
    pub text: String,
    pub distance: f32,
}

/// What happened to a text passed through the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub ordinal: usize,
    pub stored_text: String,
    /// Token count of the original input.
    pub token_count: usize,
    /// Whether the condenser produced `stored_text`.
    pub condensed: bool,
}
