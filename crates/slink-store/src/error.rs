use std::path::PathBuf;

use slink_types::BlobId;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No blob is stored under the identifier.
    #[error("blob not found: {0}")]
    NotFound(BlobId),

    /// A blob is already stored under the identifier.
    #[error("blob already exists: {0}")]
    AlreadyExists(BlobId),

    /// A ranged read started past the end of the blob.
    #[error("range start {offset} is past the end of blob {id} ({len} bytes)")]
    InvalidRange { id: BlobId, offset: u64, len: u64 },

    /// The configured storage root does not exist or is not a directory.
    #[error("storage root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
