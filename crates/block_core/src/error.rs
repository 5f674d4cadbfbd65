//! Error types for block validation, caching and generation.
//!
//! Every error here is a deterministic validation failure: there is no I/O in
//! the matching path, so nothing is retried. Hosts are expected to reject the
//! offending request and keep serving others.

use glam::IVec2;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the edge/rotation/matching/cache stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Height grid has the wrong length or a value outside its allowed range.
    #[error("invalid height grid: {0}")]
    InvalidGrid(String),

    /// Rotation axis is not one of x, y, z.
    #[error("invalid rotation axis '{0}' (expected x, y or z)")]
    InvalidAxis(String),

    /// Composite block key could not be decoded.
    #[error("invalid block key '{key}': {reason}")]
    InvalidId { key: String, reason: String },

    /// Lookup against a key that was not part of the cached catalog.
    #[error("block key '{0}' is not in the adjacency cache")]
    CacheMiss(String),

    /// Two catalog entries resolve to the same composite key.
    #[error("duplicate block key '{0}' in catalog")]
    DuplicateKey(String),
}

impl BlockError {
    pub(crate) fn invalid_id(key: &str, reason: impl Into<String>) -> Self {
        BlockError::InvalidId {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures while loading a catalog or session config from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalog entry failed validation.
    #[error("catalog entry '{id}': {source}")]
    Block {
        id: String,
        #[source]
        source: BlockError,
    },

    #[error("catalog entry '{id}' has invalid weight {weight} (must be positive and finite)")]
    InvalidWeight { id: String, weight: f64 },
}

/// Failures of the seeded generation pass.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("catalog is empty")]
    EmptyCatalog,

    /// No candidate fits at `position`, even after `tries` restarts.
    #[error("no valid block at ({}, {}) after {tries} tries", .position.x, .position.y)]
    Contradiction { position: IVec2, tries: usize },

    #[error(transparent)]
    Block(#[from] BlockError),
}

/// Result type for the core matching stack.
pub type BlockResult<T> = Result<T, BlockError>;
