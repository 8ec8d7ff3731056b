//! Sharded on-disk location of a blob.
//!
//! A blob with identifier `ab12cd34ef56` lives at `ab/12/ab12cd34ef56` below
//! the storage root. The first directory level is named after the first
//! [`SHARD_LEVEL1_LEN`] characters of the identifier and the second after the
//! next [`SHARD_LEVEL2_LEN`] characters, which bounds the number of entries in
//! any single directory as the object count grows.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::blob::BlobId;
use crate::error::TypeError;

/// Characters of the identifier used for the first shard directory.
pub const SHARD_LEVEL1_LEN: usize = 2;

/// Characters of the identifier used for the second shard directory.
pub const SHARD_LEVEL2_LEN: usize = 2;

/// Minimum identifier length needed to derive both shard directories.
pub const SHARD_PREFIX_LEN: usize = SHARD_LEVEL1_LEN + SHARD_LEVEL2_LEN;

/// Relative location of a blob inside the storage root.
///
/// Derivation is a pure function of the [`BlobId`]: the same identifier
/// always yields the same path, and because the leaf name is the identifier
/// itself, distinct identifiers never share a leaf.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShardedPath {
    level1: String,
    level2: String,
    leaf: String,
}

impl ShardedPath {
    /// Derive the sharded location of a validated identifier.
    pub fn derive(id: &BlobId) -> Self {
        let raw = id.as_str();
        Self {
            level1: raw[..SHARD_LEVEL1_LEN].to_string(),
            level2: raw[SHARD_LEVEL1_LEN..SHARD_PREFIX_LEN].to_string(),
            leaf: raw.to_string(),
        }
    }

    /// Validate a raw identifier and derive its sharded location.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use slink_types::ShardedPath;
    ///
    /// let path = ShardedPath::from_raw("ab12cd34ef56").unwrap();
    /// assert_eq!(path.relative(), Path::new("ab/12/ab12cd34ef56"));
    /// assert!(ShardedPath::from_raw("ab1").is_err());
    /// ```
    pub fn from_raw(id: &str) -> Result<Self, TypeError> {
        BlobId::parse(id).map(|id| Self::derive(&id))
    }

    /// First-level shard directory name.
    pub fn level1(&self) -> &str {
        &self.level1
    }

    /// Second-level shard directory name.
    pub fn level2(&self) -> &str {
        &self.level2
    }

    /// Leaf file name (the full identifier).
    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// Path relative to the storage root: `level1/level2/leaf`.
    pub fn relative(&self) -> PathBuf {
        self.shard_dir_relative().join(&self.leaf)
    }

    /// Relative path of the directory holding the leaf: `level1/level2`.
    pub fn shard_dir_relative(&self) -> PathBuf {
        Path::new(&self.level1).join(&self.level2)
    }

    /// Physical path of the blob below `root`.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(self.relative())
    }

    /// Physical path of the shard directory holding the blob below `root`.
    pub fn shard_dir_under(&self, root: &Path) -> PathBuf {
        root.join(self.shard_dir_relative())
    }
}

impl From<&BlobId> for ShardedPath {
    fn from(id: &BlobId) -> Self {
        Self::derive(id)
    }
}

impl fmt::Debug for ShardedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShardedPath({self})")
    }
}

impl fmt::Display for ShardedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.level1, self.level2, self.leaf)
    }
}
