//! Text embedding backends.
//!
//! fastembed-based local inference for real use, and a hashing embedder
//! for offline runs where no model can be loaded.

pub mod embedder;
pub mod hashing;
