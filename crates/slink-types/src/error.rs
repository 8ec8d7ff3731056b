use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("identifier {id:?} is shorter than the {min}-character shard prefix")]
    IdentifierTooShort { id: String, min: usize },

    #[error("invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: String },
}
