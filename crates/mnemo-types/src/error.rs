use std::fmt;

use thiserror::Error;

/// Which external collaborator an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Condenser,
    Embedder,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Condenser => write!(f, "condenser"),
            Collaborator::Embedder => write!(f, "embedder"),
        }
    }
}

/// Errors raised by collaborator implementations (embedders, condensers).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("model error: {0}")]
    Model(String),
}

/// Errors from memory store operations.
///
/// A failed `add` never leaves a partial record behind: the text list and
/// the vector index keep equal length.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("{collaborator} unavailable: {source}")]
    CollaboratorUnavailable {
        collaborator: Collaborator,
        #[source]
        source: CollaboratorError,
    },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedder returned {actual} vectors for {expected} inputs")]
    EmbeddingCountMismatch { expected: usize, actual: usize },

    #[error("text must not be empty")]
    EmptyText,

    #[error("result limit must be at least 1, got {0}")]
    InvalidLimit(usize),

    #[error("index already holds {0} vectors; a new store needs an empty index")]
    IndexNotEmpty(usize),
}

impl MemoryError {
    pub fn condenser(source: CollaboratorError) -> Self {
        MemoryError::CollaboratorUnavailable {
            collaborator: Collaborator::Condenser,
            source,
        }
    }

    pub fn embedder(source: CollaboratorError) -> Self {
        MemoryError::CollaboratorUnavailable {
            collaborator: Collaborator::Embedder,
            source,
        }
    }
}

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
