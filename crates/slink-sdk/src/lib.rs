//! High-level SDK for slink.
//!
//! Ties the blob store and the link index together behind one configuration
//! and provides the stored-object notification handler a host calls after
//! each successful store. This is the main entry point for hosts embedding
//! slink.

pub mod area;
pub mod config;
pub mod error;
pub mod resolver;

pub use area::{LinkStatus, StorageArea, StoredReport};
pub use config::{ConfigError, SlinkConfig};
pub use error::{SdkError, SdkResult};
pub use resolver::{
    key_from_dicom_json, DicomJsonResolver, MetadataResolver, Resolution, ResolveError,
};

// Re-export key types
pub use slink_index::{LinkError, LinkIndexer, LinkOutcome};
pub use slink_store::{BlobStore, StoreError};
pub use slink_types::{BlobId, GroupingKey, KeyField, ShardedPath};
