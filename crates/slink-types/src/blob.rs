use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::shard::SHARD_PREFIX_LEN;

/// Host-assigned identifier of a stored blob.
///
/// A `BlobId` is opaque to slink: the host generates it and guarantees it is
/// unique. Construction only checks that it is safe to use as a file name and
/// long enough to derive both shard directories from its prefix.
///
/// Accepted characters are ASCII letters, digits, `-`, `_` and `.`. The shard
/// prefix (the first [`SHARD_PREFIX_LEN`] characters) must not contain `.`, so
/// no shard directory can ever be `.` or `..`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlobId(String);

impl BlobId {
    /// Validate and wrap a host identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use slink_types::BlobId;
    ///
    /// assert!(BlobId::parse("ab12cd34ef56").is_ok());
    /// assert!(BlobId::parse("ab1").is_err());
    /// assert!(BlobId::parse("ab/12").is_err());
    /// ```
    pub fn parse(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();

        if let Some(ch) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(TypeError::InvalidIdentifier {
                reason: format!("contains forbidden character: {ch:?}"),
                id,
            });
        }

        // All remaining characters are ASCII, so byte length is char length.
        if id.len() < SHARD_PREFIX_LEN {
            return Err(TypeError::IdentifierTooShort {
                id,
                min: SHARD_PREFIX_LEN,
            });
        }

        if id[..SHARD_PREFIX_LEN].contains('.') {
            return Err(TypeError::InvalidIdentifier {
                id,
                reason: "shard prefix must not contain '.'".into(),
            });
        }

        Ok(Self(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.0)
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BlobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for BlobId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BlobId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for BlobId {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BlobId> for String {
    fn from(id: BlobId) -> Self {
        id.0
    }
}
