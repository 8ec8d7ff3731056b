//! Error types for link operations.

use std::path::PathBuf;

use slink_types::KeyField;
use thiserror::Error;

/// Errors that can occur while maintaining the link index.
///
/// An entry that already exists at the link path is never an error.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A grouping key component is empty.
    #[error("incomplete metadata: {field} is empty")]
    IncompleteMetadata { field: KeyField },

    /// A grouping key component cannot be used as a single path segment.
    #[error("invalid {field} component {value:?}: {reason}")]
    InvalidComponent {
        field: KeyField,
        value: String,
        reason: String,
    },

    /// Link targets must be absolute paths.
    #[error("link target is not absolute: {}", .0.display())]
    RelativeTarget(PathBuf),

    /// The configured link root does not exist or is not a directory.
    #[error("link root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    /// I/O error while creating directories or the link.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for link operations.
pub type LinkResult<T> = std::result::Result<T, LinkError>;
