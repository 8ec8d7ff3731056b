//! The [`LinkIndexer`] trait defining the link index interface.

use std::path::{Path, PathBuf};

use slink_types::GroupingKey;

use crate::error::LinkResult;

/// What [`LinkIndexer::ensure`] did. Both outcomes are success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// This call created the link.
    Created,
    /// An entry already existed at the link path and was left untouched.
    AlreadyPresent,
}

/// Secondary index from grouping keys to blob locations.
///
/// Implementations must be thread-safe and idempotent: any number of calls,
/// sequential or concurrent, with the same key converge to exactly one entry
/// and never report the entry's prior existence as an error.
pub trait LinkIndexer: Send + Sync {
    /// Ensure an entry for `key` exists, pointing at `target`.
    ///
    /// Fails with `IncompleteMetadata` if any key component is empty, in
    /// which case nothing is created.
    fn ensure(&self, key: &GroupingKey, target: &Path) -> LinkResult<LinkOutcome>;

    /// Where the entry for `key` lives.
    fn link_path(&self, key: &GroupingKey) -> LinkResult<PathBuf>;

    /// Read back the target recorded for `key`.
    ///
    /// Returns `Ok(None)` if no entry exists.
    fn resolve(&self, key: &GroupingKey) -> LinkResult<Option<PathBuf>>;
}
