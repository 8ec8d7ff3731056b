//! Foundation types for slink.
//!
//! This crate provides the identifier and path types shared by the blob store
//! and the link index. Every other slink crate depends on `slink-types`.
//!
//! # Key Types
//!
//! - [`BlobId`] -- Validated, host-assigned blob identifier
//! - [`ShardedPath`] -- Two-level sharded location derived from a [`BlobId`]
//! - [`GroupingKey`] -- Three grouping levels plus a leaf identifier
//! - [`KeyField`] -- Names one component of a [`GroupingKey`]

pub mod blob;
pub mod error;
pub mod grouping;
pub mod shard;

pub use blob::BlobId;
pub use error::TypeError;
pub use grouping::{GroupingKey, KeyField};
pub use shard::{ShardedPath, SHARD_LEVEL1_LEN, SHARD_LEVEL2_LEN, SHARD_PREFIX_LEN};
