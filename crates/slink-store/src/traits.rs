use slink_types::BlobId;

use crate::error::StoreResult;

/// Identifier-keyed store of immutable blobs.
///
/// All implementations must satisfy these invariants:
/// - A blob is created at most once per identifier; a second `create` fails
///   with `AlreadyExists` and leaves the first blob untouched.
/// - A reader never observes a partially written blob.
/// - Operations on different identifiers never interfere.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Store `content` under `id`.
    ///
    /// Fails with `AlreadyExists` if a blob is already stored under `id`.
    fn create(&self, id: &BlobId, content: &[u8]) -> StoreResult<()>;

    /// Read the whole blob.
    ///
    /// Fails with `NotFound` if no blob is stored under `id`.
    fn read_whole(&self, id: &BlobId) -> StoreResult<Vec<u8>>;

    /// Read from `offset` to the end of the blob.
    ///
    /// An `offset` equal to the blob length yields an empty vector. An
    /// `offset` past the end fails with `InvalidRange`.
    fn read_range(&self, id: &BlobId, offset: u64) -> StoreResult<Vec<u8>>;

    /// Delete the blob.
    ///
    /// Fails with `NotFound` if no blob is stored under `id`.
    fn remove(&self, id: &BlobId) -> StoreResult<()>;

    /// Size of the blob in bytes.
    ///
    /// Default implementation reads the whole blob. Backends should override
    /// with a metadata lookup.
    fn size(&self, id: &BlobId) -> StoreResult<u64> {
        self.read_whole(id).map(|data| data.len() as u64)
    }

    /// Check whether a blob is stored under `id`.
    fn exists(&self, id: &BlobId) -> StoreResult<bool>;
}
