use serde::Serialize;
use slink_index::{FsLinkIndexer, LinkIndexer, LinkOutcome};
use slink_store::{BlobStore, FsBlobStore, StoreResult};
use slink_types::{BlobId, GroupingKey};
use tracing::{debug, info, warn};

use crate::config::SlinkConfig;
use crate::error::SdkResult;
use crate::resolver::{MetadataResolver, Resolution};

/// What happened to the link of a stored instance.
///
/// Every variant is a successful store: linking is secondary and never fails
/// the instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    Created,
    AlreadyPresent,
    /// Metadata was incomplete; no link was attempted.
    Skipped { missing: Vec<String> },
    /// Linking was attempted and failed.
    Failed { reason: String },
}

impl From<LinkOutcome> for LinkStatus {
    fn from(outcome: LinkOutcome) -> Self {
        match outcome {
            LinkOutcome::Created => Self::Created,
            LinkOutcome::AlreadyPresent => Self::AlreadyPresent,
        }
    }
}

/// Result of handling a stored-instance notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoredReport {
    pub instance_id: String,
    pub blob_id: Option<BlobId>,
    pub link: LinkStatus,
}

/// Blob store and link index built from one [`SlinkConfig`].
///
/// Blob operations are the primary path: their errors propagate unchanged.
/// Link maintenance is secondary: failures are logged and reported, never
/// returned as errors.
#[derive(Clone, Debug)]
pub struct StorageArea {
    store: FsBlobStore,
    links: FsLinkIndexer,
}

impl StorageArea {
    /// Open both roots. Neither is created.
    pub fn open(config: &SlinkConfig) -> SdkResult<Self> {
        config.validate()?;
        let store = FsBlobStore::open(&config.storage_root)?;
        let links = FsLinkIndexer::open(&config.link_root)?;
        info!(
            storage_root = ?config.storage_root,
            link_root = ?config.link_root,
            "storage area opened"
        );
        Ok(Self { store, links })
    }

    pub fn store(&self) -> &FsBlobStore {
        &self.store
    }

    pub fn links(&self) -> &FsLinkIndexer {
        &self.links
    }

    // ---- Blob operations ----

    pub fn create(&self, id: &BlobId, content: &[u8]) -> StoreResult<()> {
        self.store.create(id, content)
    }

    pub fn read_whole(&self, id: &BlobId) -> StoreResult<Vec<u8>> {
        self.store.read_whole(id)
    }

    pub fn read_range(&self, id: &BlobId, offset: u64) -> StoreResult<Vec<u8>> {
        self.store.read_range(id, offset)
    }

    /// Remove a blob. Links pointing at it are left dangling.
    pub fn remove(&self, id: &BlobId) -> StoreResult<()> {
        self.store.remove(id)
    }

    // ---- Link operations ----

    /// Link a stored blob under `key`.
    ///
    /// The blob must exist when the link is made; otherwise nothing is
    /// created and the status is `Failed`.
    pub fn link(&self, id: &BlobId, key: &GroupingKey) -> LinkStatus {
        match self.store.exists(id) {
            Ok(true) => {}
            Ok(false) => {
                warn!(id = %id, key = %key, "not linking: blob is not stored");
                return LinkStatus::Failed {
                    reason: format!("blob not stored: {id}"),
                };
            }
            Err(e) => {
                warn!(id = %id, error = %e, "not linking: blob lookup failed");
                return LinkStatus::Failed {
                    reason: e.to_string(),
                };
            }
        }

        match self.links.ensure(key, &self.store.blob_path(id)) {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                warn!(id = %id, key = %key, error = %e, "link creation failed");
                LinkStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Store a blob, then link it under `key`.
    ///
    /// Fails only if the blob could not be stored.
    pub fn store_and_link(
        &self,
        id: &BlobId,
        content: &[u8],
        key: &GroupingKey,
    ) -> StoreResult<LinkStatus> {
        self.create(id, content)?;
        Ok(self.link(id, key))
    }

    /// Handle the host's notification that an instance has been stored.
    ///
    /// Resolves the instance's blob and grouping key and links it. Nothing in
    /// here can fail the stored instance: resolver errors, incomplete
    /// metadata and link errors all end up in the returned report.
    pub fn on_stored(&self, instance_id: &str, resolver: &dyn MetadataResolver) -> StoredReport {
        let (blob_id, link) = match resolver.resolve(instance_id) {
            Ok(Resolution::Complete { blob_id, key }) => {
                let status = self.link(&blob_id, &key);
                (Some(blob_id), status)
            }
            Ok(Resolution::Incomplete { missing }) => {
                warn!(instance = instance_id, ?missing, "skipping link: incomplete metadata");
                let missing = missing.into_iter().map(String::from).collect();
                (None, LinkStatus::Skipped { missing })
            }
            Err(e) => {
                warn!(instance = instance_id, error = %e, "skipping link: metadata unavailable");
                (
                    None,
                    LinkStatus::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        };

        debug!(instance = instance_id, ?link, "stored notification handled");
        StoredReport {
            instance_id: instance_id.to_string(),
            blob_id,
            link,
        }
    }
}
