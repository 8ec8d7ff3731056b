//! Hierarchical link index for slink.
//!
//! The index mirrors stored blobs under a human-navigable tree:
//! `link_root/level1/level2/level3/leaf` is a symbolic link to the blob's
//! physical path in the sharded store. The index is a convenience structure,
//! never the system of record: the blob store stays authoritative.
//!
//! # Architecture
//!
//! - **Ensure** is idempotent. An existing entry at the link path is left
//!   untouched and reported as [`LinkOutcome::AlreadyPresent`].
//! - **Races** between concurrent callers for the same key collapse into the
//!   idempotent contract: losing the race to create the link is success.
//! - **Dangling links** are possible. Removing a blob does not touch the
//!   index.
//!
//! # Modules
//!
//! - [`error`] -- Error types for link operations
//! - [`traits`] -- The [`LinkIndexer`] trait and [`LinkOutcome`]
//! - [`names`] -- Grouping key component validation
//! - [`fs`] -- Symlink-based [`FsLinkIndexer`]

pub mod error;
pub mod fs;
pub mod names;
pub mod traits;

pub use error::{LinkError, LinkResult};
pub use fs::FsLinkIndexer;
pub use names::{validate_component, validate_key};
pub use traits::{LinkIndexer, LinkOutcome};
