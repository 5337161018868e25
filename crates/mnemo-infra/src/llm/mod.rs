//! Condenser backends.
//!
//! An OpenAI-compatible chat client (works with OpenAI, Ollama, vLLM and
//! similar servers) and an offline extractive condenser.

pub mod condenser;
pub mod lead;
