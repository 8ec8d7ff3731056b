use std::collections::HashMap;
use std::sync::RwLock;

use slink_types::BlobId;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. All blobs are held in memory behind a
/// `RwLock` for safe concurrent access. Blobs are cloned on read/write.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<BlobId, Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Return a sorted list of all blob IDs in the store.
    pub fn all_ids(&self) -> Vec<BlobId> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut ids: Vec<BlobId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn create(&self, id: &BlobId, content: &[u8]) -> StoreResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        if map.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.clone()));
        }
        map.insert(id.clone(), content.to_vec());
        Ok(())
    }

    fn read_whole(&self, id: &BlobId) -> StoreResult<Vec<u8>> {
        let map = self.blobs.read().expect("lock poisoned");
        map.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn read_range(&self, id: &BlobId, offset: u64) -> StoreResult<Vec<u8>> {
        let map = self.blobs.read().expect("lock poisoned");
        let data = map
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let len = data.len() as u64;
        if offset > len {
            return Err(StoreError::InvalidRange {
                id: id.clone(),
                offset,
                len,
            });
        }
        Ok(data[offset as usize..].to_vec())
    }

    fn remove(&self, id: &BlobId) -> StoreResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        map.remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn size(&self, id: &BlobId) -> StoreResult<u64> {
        let map = self.blobs.read().expect("lock poisoned");
        map.get(id)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> BlobId {
        BlobId::parse(raw).unwrap()
    }

    #[test]
    fn create_and_read() {
        let store = InMemoryBlobStore::new();
        store.create(&id("ab12cd34"), b"hello world").unwrap();
        assert_eq!(store.read_whole(&id("ab12cd34")).unwrap(), b"hello world");
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 11);
    }

    #[test]
    fn create_is_write_once() {
        let store = InMemoryBlobStore::new();
        store.create(&id("ab12cd34"), b"first").unwrap();
        assert!(matches!(
            store.create(&id("ab12cd34"), b"second"),
            Err(StoreError::AlreadyExists(_))
        ));
        assert_eq!(store.read_whole(&id("ab12cd34")).unwrap(), b"first");
    }

    #[test]
    fn read_range_matches_filesystem_policy() {
        let store = InMemoryBlobStore::new();
        store.create(&id("ab12cd34"), b"hello").unwrap();
        assert_eq!(store.read_range(&id("ab12cd34"), 2).unwrap(), b"llo");
        assert!(store.read_range(&id("ab12cd34"), 5).unwrap().is_empty());
        assert!(matches!(
            store.read_range(&id("ab12cd34"), 6),
            Err(StoreError::InvalidRange { offset: 6, len: 5, .. })
        ));
    }

    #[test]
    fn remove_and_missing() {
        let store = InMemoryBlobStore::new();
        store.create(&id("ab12cd34"), b"x").unwrap();
        store.remove(&id("ab12cd34")).unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            store.remove(&id("ab12cd34")),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.read_whole(&id("ab12cd34")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn size_and_exists() {
        let store = InMemoryBlobStore::new();
        assert!(!store.exists(&id("ab12cd34")).unwrap());
        store.create(&id("ab12cd34"), b"four").unwrap();
        assert!(store.exists(&id("ab12cd34")).unwrap());
        assert_eq!(store.size(&id("ab12cd34")).unwrap(), 4);
    }

    #[test]
    fn all_ids_sorted() {
        let store = InMemoryBlobStore::new();
        store.create(&id("zz000001"), b"z").unwrap();
        store.create(&id("aa000001"), b"a").unwrap();
        let ids: Vec<String> = store.all_ids().into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["aa000001", "zz000001"]);
    }

    #[test]
    fn usable_as_trait_object() {
        let store: Box<dyn BlobStore> = Box::new(InMemoryBlobStore::default());
        store.create(&id("ab12cd34"), b"dyn").unwrap();
        assert_eq!(store.read_whole(&id("ab12cd34")).unwrap(), b"dyn");
    }

    #[test]
    fn debug_format() {
        let store = InMemoryBlobStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryBlobStore"));
        assert!(debug.contains("blob_count"));
    }
}
