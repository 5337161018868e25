//! Memory pipeline and collaborator trait definitions for mnemo.
//!
//! This crate defines the "ports" (embedder, condenser, token counter) that
//! the infrastructure layer implements, plus the vector index and the
//! `MemoryStore` that ties them together. It depends only on `mnemo-types`.

pub mod memory;
