//! Catalog error model.

use std::path::PathBuf;

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the catalog layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Every variant is recoverable: an operation that returns one of these has
/// left the catalog exactly as it found it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An item with the same identifier is already in the catalog.
    #[error("item with id '{0}' already exists")]
    DuplicateId(ItemId),

    /// A sale asked for more units than are on hand.
    #[error("insufficient stock for '{id}': requested {requested}, available {available}")]
    InsufficientStock {
        id: ItemId,
        requested: i64,
        available: i64,
    },

    /// A stock operation was called with an unusable amount (e.g. negative).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Construction arguments failed validation.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A snapshot could not be read, written or decoded.
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl CatalogError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// True for malformed construction data and for every snapshot failure.
    ///
    /// Callers that only care whether the input was unusable, and not where it
    /// went wrong, can branch on this instead of matching snapshot kinds.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData(_) | Self::Snapshot(_))
    }
}

/// Failure while persisting or restoring a catalog snapshot.
///
/// `index` fields are zero-based positions in the snapshot's record array.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("record {index} has no `type` field")]
    MissingType { index: usize },

    #[error("record {index} has unknown type '{type_name}'")]
    UnknownType { index: usize, type_name: String },

    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("record {index} repeats id '{id}'")]
    DuplicateRecord { index: usize, id: String },
}

impl SnapshotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}
