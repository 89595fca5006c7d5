//! Upload folder storage.
//!
//! Files are only ever addressed through a [`StoredImageName`], which cannot
//! contain path separators or start with a dot, so every path produced here
//! stays inside the upload folder.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vitrine_core::StoredImageName;

/// Result of trying to delete an uploaded file.
///
/// Removal never fails the surrounding request; callers log the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The file existed and was deleted.
    Removed,
    /// There was no file with that name.
    NotFound,
    /// The process may not delete the file.
    PermissionDenied,
    /// Any other I/O failure.
    Failed(ErrorKind),
}

impl RemovalOutcome {
    /// Whether the file may still be on disk.
    ///
    /// A missing file counts as success: the goal of removing it is met.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Failed(_))
    }

    fn from_io(result: std::io::Result<()>) -> Self {
        match result {
            Ok(()) => Self::Removed,
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Self::NotFound,
                ErrorKind::PermissionDenied => Self::PermissionDenied,
                other => Self::Failed(other),
            },
        }
    }
}

impl fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => f.write_str("removed"),
            Self::NotFound => f.write_str("not found"),
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

/// The folder holding uploaded product images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The upload folder.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute or relative path of a stored file.
    #[must_use]
    pub fn path_for(&self, name: &StoredImageName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    /// Create the upload folder and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the folder cannot be created.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write `bytes` under `name`, returning the file's path.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the write fails.
    pub async fn save(&self, name: &StoredImageName, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.path_for(name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Saved upload");
        Ok(path)
    }

    /// Delete the file stored under `name`.
    pub async fn remove(&self, name: &StoredImageName) -> RemovalOutcome {
        RemovalOutcome::from_io(tokio::fs::remove_file(self.path_for(name)).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::SanitizedFilename;

    use super::*;

    fn name(raw: &str) -> StoredImageName {
        StoredImageName::generate(&SanitizedFilename::parse(raw).unwrap())
    }

    #[tokio::test]
    async fn test_save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));
        store.ensure_dir().await.unwrap();

        let stored = name("shoe.png");
        let path = store.save(&stored, b"bytes").await.unwrap();
        assert!(path.starts_with(store.dir()));
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");

        assert_eq!(store.remove(&stored).await, RemovalOutcome::Removed);
        assert!(!path.exists());
        assert_eq!(store.remove(&stored).await, RemovalOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_same_original_name_gives_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let first = store.save(&name("shoe.png"), b"one").await.unwrap();
        let second = store.save(&name("shoe.png"), b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("static").join("uploads"));

        store.ensure_dir().await.unwrap();
        store.ensure_dir().await.unwrap();

        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_outcome_from_io_error_kinds() {
        assert_eq!(RemovalOutcome::from_io(Ok(())), RemovalOutcome::Removed);
        assert_eq!(
            RemovalOutcome::from_io(Err(ErrorKind::PermissionDenied.into())),
            RemovalOutcome::PermissionDenied
        );
        assert_eq!(
            RemovalOutcome::from_io(Err(ErrorKind::Interrupted.into())),
            RemovalOutcome::Failed(ErrorKind::Interrupted)
        );
    }

    #[test]
    fn test_missing_file_is_not_a_failure() {
        assert!(!RemovalOutcome::Removed.is_failure());
        assert!(!RemovalOutcome::NotFound.is_failure());
        assert!(RemovalOutcome::PermissionDenied.is_failure());
        assert!(RemovalOutcome::Failed(ErrorKind::Other).is_failure());
    }
}
