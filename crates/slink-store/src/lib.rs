//! Identifier-keyed blob storage for slink.
//!
//! Blobs are immutable byte strings stored under a host-assigned
//! [`BlobId`](slink_types::BlobId). On disk every blob lives at
//! `<root>/<id[0:2]>/<id[2:4]>/<id>`, so no directory grows past a bounded
//! number of entries regardless of how many blobs are stored.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`FsBlobStore`] -- sharded directory tree on the local filesystem
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Blobs are written once. Creating an existing identifier fails with
//!    [`StoreError::AlreadyExists`].
//! 2. Readers never see a partially written blob: content is written to a
//!    temporary file in the shard directory and renamed into place.
//! 3. No cache or index is kept; every call re-derives the sharded path.
//! 4. Shard directories are never pruned.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;
