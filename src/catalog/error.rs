use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

/// Raw metadata could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Errors returned by a [`CatalogStore`](super::CatalogStore) query.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to embed query: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector search failed: {0}")]
    VectorDb(#[from] VectorDbError),

    #[error("catalog store unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors raised while loading or writing the catalog.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog file {path} must contain a JSON array of objects")]
    NotAnArray { path: PathBuf },

    #[error("failed to embed '{name}': {source}")]
    Embedding {
        name: String,
        #[source]
        source: EmbeddingError,
    },

    #[error("failed to write catalog: {0}")]
    VectorDb(#[from] VectorDbError),
}
