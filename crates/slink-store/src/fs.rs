use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use slink_types::{BlobId, ShardedPath};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// Prefix of in-flight temporary files inside a shard directory.
///
/// Blob identifiers never start with `.`, so a temporary file can never be
/// mistaken for a blob.
const TEMP_PREFIX: &str = ".tmp-";

/// Blob store backed by a sharded directory tree.
///
/// Layout:
/// ```text
/// <root>/ab/12/ab12cd34ef56
/// <root>/ab/12/ab12ffee0011
/// <root>/c0/ff/c0ffee000042
/// ```
///
/// The store is stateless apart from its root: every call derives the
/// [`ShardedPath`] from the identifier and goes straight to the filesystem.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at an existing directory.
    ///
    /// The root is never created; it must already exist.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::RootMissing(root));
        }
        Ok(Self { root })
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Physical path of the blob stored under `id`.
    ///
    /// The path is computed, not checked: it may not exist.
    pub fn blob_path(&self, id: &BlobId) -> PathBuf {
        ShardedPath::derive(id).under(&self.root)
    }

    fn open_blob(&self, id: &BlobId) -> StoreResult<File> {
        File::open(self.blob_path(id)).map_err(|e| map_missing(e, id))
    }
}

impl BlobStore for FsBlobStore {
    fn create(&self, id: &BlobId, content: &[u8]) -> StoreResult<()> {
        let shard = ShardedPath::derive(id);
        let dir = shard.shard_dir_under(&self.root);
        let leaf = shard.under(&self.root);

        // Tolerates concurrent creation of the same shard directories.
        fs::create_dir_all(&dir)?;

        if leaf.try_exists()? {
            return Err(StoreError::AlreadyExists(id.clone()));
        }

        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;

        // No-clobber so that of two concurrent writers exactly one wins and
        // the other sees `AlreadyExists`. The loser's temp file is removed
        // when the returned handle drops.
        match tmp.persist_noclobber(&leaf) {
            Ok(_) => {
                debug!(id = %id, len = content.len(), path = ?leaf, "blob created");
                Ok(())
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(id.clone()))
            }
            Err(e) => Err(e.error.into()),
        }
    }

    fn read_whole(&self, id: &BlobId) -> StoreResult<Vec<u8>> {
        fs::read(self.blob_path(id)).map_err(|e| map_missing(e, id))
    }

    fn read_range(&self, id: &BlobId, offset: u64) -> StoreResult<Vec<u8>> {
        let mut file = self.open_blob(id)?;
        let len = file.metadata()?.len();
        if offset > len {
            return Err(StoreError::InvalidRange {
                id: id.clone(),
                offset,
                len,
            });
        }

        file.seek(SeekFrom::Start(offset))?;
        let mut buf = Vec::with_capacity((len - offset) as usize);
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn remove(&self, id: &BlobId) -> StoreResult<()> {
        let path = self.blob_path(id);
        fs::remove_file(&path).map_err(|e| map_missing(e, id))?;
        debug!(id = %id, path = ?path, "blob removed");
        Ok(())
    }

    fn size(&self, id: &BlobId) -> StoreResult<u64> {
        let metadata = fs::metadata(self.blob_path(id)).map_err(|e| map_missing(e, id))?;
        Ok(metadata.len())
    }

    fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        Ok(self.blob_path(id).try_exists()?)
    }
}

fn map_missing(err: io::Error, id: &BlobId) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(id.clone())
    } else {
        StoreError::Io(err)
    }
}
