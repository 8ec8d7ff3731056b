use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use slink_types::GroupingKey;
use tracing::debug;

use crate::error::{LinkError, LinkResult};
use crate::names::relative_link_path;
use crate::traits::{LinkIndexer, LinkOutcome};

/// Link index made of symbolic links below a root directory.
///
/// Layout:
/// ```text
/// <root>/PAT1/STU1/SER1/SOP1 -> /var/lib/slink/blobs/ab/12/ab12cd34ef56
/// ```
///
/// Targets are absolute paths, so links keep resolving if the link tree is
/// moved but break if the storage root is.
#[derive(Clone, Debug)]
pub struct FsLinkIndexer {
    root: PathBuf,
}

impl FsLinkIndexer {
    /// Open an index rooted at an existing directory.
    ///
    /// The root is never created; it must already exist.
    pub fn open(root: impl Into<PathBuf>) -> LinkResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LinkError::RootMissing(root));
        }
        Ok(Self { root })
    }

    /// The link root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LinkIndexer for FsLinkIndexer {
    fn ensure(&self, key: &GroupingKey, target: &Path) -> LinkResult<LinkOutcome> {
        let path = self.link_path(key)?;
        if !target.is_absolute() {
            return Err(LinkError::RelativeTarget(target.to_path_buf()));
        }

        if entry_exists(&path)? {
            debug!(key = %key, path = ?path, "link already present");
            return Ok(LinkOutcome::AlreadyPresent);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Another caller may have created the entry since the check above.
        match symlink(target, &path) {
            Ok(()) => {
                debug!(key = %key, path = ?path, target = ?target, "link created");
                Ok(LinkOutcome::Created)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(key = %key, path = ?path, "link created concurrently");
                Ok(LinkOutcome::AlreadyPresent)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn link_path(&self, key: &GroupingKey) -> LinkResult<PathBuf> {
        Ok(self.root.join(relative_link_path(key)?))
    }

    fn resolve(&self, key: &GroupingKey) -> LinkResult<Option<PathBuf>> {
        let path = self.link_path(key)?;
        match fs::read_link(&path) {
            Ok(target) => Ok(Some(target)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Whether anything occupies `path`, without following symlinks.
///
/// A dangling link counts as present.
fn entry_exists(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use slink_types::KeyField;
    use std::thread;

    struct Fixture {
        _dir: tempfile::TempDir,
        links: FsLinkIndexer,
        target: PathBuf,
    }

    fn setup() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let link_root = dir.path().join("links");
        fs::create_dir(&link_root).unwrap();
        let target = dir.path().join("blob");
        fs::write(&target, b"hello").unwrap();
        Fixture {
            links: FsLinkIndexer::open(&link_root).unwrap(),
            target,
            _dir: dir,
        }
    }

    fn key() -> GroupingKey {
        GroupingKey::new("PAT1", "STU1", "SER1", "SOP1")
    }

    fn count_entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn ensure_creates_link_to_target() {
        let fx = setup();
        let outcome = fx.links.ensure(&key(), &fx.target).unwrap();
        assert_eq!(outcome, LinkOutcome::Created);

        let path = fx.links.root().join("PAT1/STU1/SER1/SOP1");
        assert!(fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&path).unwrap(), fx.target);
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn ensure_is_idempotent() {
        let fx = setup();
        assert_eq!(fx.links.ensure(&key(), &fx.target).unwrap(), LinkOutcome::Created);
        assert_eq!(
            fx.links.ensure(&key(), &fx.target).unwrap(),
            LinkOutcome::AlreadyPresent
        );

        let series = fx.links.root().join("PAT1/STU1/SER1");
        assert_eq!(count_entries(&series), 1);
    }

    #[test]
    fn existing_entry_is_not_modified() {
        let fx = setup();
        fx.links.ensure(&key(), &fx.target).unwrap();

        let other = fx.target.with_file_name("other");
        fs::write(&other, b"other").unwrap();
        assert_eq!(
            fx.links.ensure(&key(), &other).unwrap(),
            LinkOutcome::AlreadyPresent
        );
        assert_eq!(fx.links.resolve(&key()).unwrap(), Some(fx.target.clone()));
    }

    #[test]
    fn dangling_link_counts_as_present() {
        let fx = setup();
        fx.links.ensure(&key(), &fx.target).unwrap();
        fs::remove_file(&fx.target).unwrap();

        assert_eq!(
            fx.links.ensure(&key(), &fx.target).unwrap(),
            LinkOutcome::AlreadyPresent
        );
        assert_eq!(fx.links.resolve(&key()).unwrap(), Some(fx.target.clone()));
    }

    #[test]
    fn empty_component_creates_nothing() {
        let fx = setup();
        let key = GroupingKey::new("PAT1", "", "SER1", "SOP1");
        let err = fx.links.ensure(&key, &fx.target).unwrap_err();
        assert!(matches!(
            err,
            LinkError::IncompleteMetadata {
                field: KeyField::Level2
            }
        ));
        assert_eq!(count_entries(fx.links.root()), 0);
    }

    #[test]
    fn traversal_component_is_rejected() {
        let fx = setup();
        let key = GroupingKey::new("..", "STU1", "SER1", "SOP1");
        assert!(matches!(
            fx.links.ensure(&key, &fx.target),
            Err(LinkError::InvalidComponent { .. })
        ));
        assert_eq!(count_entries(fx.links.root()), 0);
    }

    #[test]
    fn relative_target_is_rejected() {
        let fx = setup();
        assert!(matches!(
            fx.links.ensure(&key(), Path::new("ab/12/ab12cd34")),
            Err(LinkError::RelativeTarget(_))
        ));
        assert_eq!(count_entries(fx.links.root()), 0);
    }

    #[test]
    fn siblings_share_directories() {
        let fx = setup();
        fx.links.ensure(&key(), &fx.target).unwrap();
        fx.links
            .ensure(&GroupingKey::new("PAT1", "STU1", "SER1", "SOP2"), &fx.target)
            .unwrap();
        fx.links
            .ensure(&GroupingKey::new("PAT1", "STU1", "SER2", "SOP3"), &fx.target)
            .unwrap();

        assert_eq!(count_entries(&fx.links.root().join("PAT1/STU1")), 2);
        assert_eq!(count_entries(&fx.links.root().join("PAT1/STU1/SER1")), 2);
    }

    #[test]
    fn resolve_missing_is_none() {
        let fx = setup();
        assert_eq!(fx.links.resolve(&key()).unwrap(), None);
    }

    #[test]
    fn open_requires_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FsLinkIndexer::open(dir.path().join("missing")),
            Err(LinkError::RootMissing(_))
        ));
    }

    #[test]
    fn concurrent_ensure_converges() {
        let fx = setup();
        let links = &fx.links;
        let target = fx.target.as_path();

        let outcomes: Vec<LinkResult<LinkOutcome>> = thread::scope(|s| {
            let handles: Vec<_> = (0..32)
                .map(|_| s.spawn(move || links.ensure(&key(), target)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(outcomes.iter().all(|o| o.is_ok()));
        let created = outcomes
            .iter()
            .filter(|o| matches!(o, Ok(LinkOutcome::Created)))
            .count();
        assert_eq!(created, 1);

        let series = links.root().join("PAT1/STU1/SER1");
        assert_eq!(count_entries(&series), 1);
        assert_eq!(fs::read_link(series.join("SOP1")).unwrap(), fx.target);
    }
}
