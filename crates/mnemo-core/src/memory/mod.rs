//! Semantic memory: ingestion, indexing and retrieval.
//!
//! `MemoryStore` condenses long inputs through a `Condenser`, fingerprints
//! the stored text with an `Embedder`, and keeps the vectors in a
//! `VectorIndex` whose rows line up with the stored texts.

pub mod box_condenser;
pub mod box_embedder;
pub mod condenser;
pub mod embedder;
pub mod index;
pub mod store;
pub mod tokens;
