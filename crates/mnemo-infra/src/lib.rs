//! Infrastructure layer for mnemo.
//!
//! Contains implementations of the collaborator traits defined in
//! `mnemo-core`: fastembed and hashing embedders, OpenAI-compatible and
//! lead-sentence condensers, a Hugging Face tokenizer counter, and the
//! configuration file loader.

pub mod config;
pub mod llm;
pub mod tokenizer;
pub mod vector;
