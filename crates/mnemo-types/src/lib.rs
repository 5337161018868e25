//! Shared domain types for mnemo.
//!
//! This crate contains the types used across the mnemo workspace:
//! stored memory records, search hits, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod memory;
