//! Blob store backed by a single flat directory

use crate::error::{BlobStoreError, Result};
use crate::types::{Removal, StorageReference};
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Flat-directory store that maps storage references to physical files
#[derive(Debug)]
pub struct BlobStore {
    root: PathBuf,
    public_prefix: String,
    /// Last stamp handed out by `generate_name`
    last_stamp: AtomicI64,
}

impl BlobStore {
    /// Create a store rooted at `root` whose references start with `public_prefix`
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
            last_stamp: AtomicI64::new(0),
        }
    }

    /// Create the managed root directory if it does not exist yet
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!(root = ?self.root, prefix = %self.public_prefix, "Blob store initialized");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Generate a filename for a new blob: `<nanosecond stamp><extension>`.
    ///
    /// The stamp is strictly increasing within the process even when the
    /// clock reads the same value twice or steps backwards.
    pub fn generate_name(&self, extension: &str) -> String {
        let now = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let previous = self
            .last_stamp
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        let stamp = now.max(previous + 1);
        format!("{stamp}{extension}")
    }

    /// Durably write `content` as `filename` and return its storage reference.
    ///
    /// Never overwrites an existing file. A partially written file is removed
    /// before the error is returned.
    pub async fn write(&self, filename: &str, content: &[u8]) -> Result<StorageReference> {
        if !is_plain_name(filename) {
            return Err(BlobStoreError::InvalidName(filename.to_string()));
        }

        let path = self.root.join(filename);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        if let Err(e) = write_and_sync(&mut file, content).await {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path).await {
                warn!(path = ?path, error = %cleanup, "Failed to remove partial blob");
            }
            return Err(e.into());
        }

        let reference = StorageReference::new(format!("{}/{}", self.public_prefix, filename));
        debug!(path = ?path, reference = %reference, size = content.len(), "Blob written");
        Ok(reference)
    }

    /// Map a storage reference to its physical path under the managed root
    pub fn resolve(&self, reference: &StorageReference) -> Result<PathBuf> {
        let name = reference
            .as_str()
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| is_plain_name(name))
            .ok_or_else(|| BlobStoreError::InvalidReference(reference.to_string()))?;
        Ok(self.root.join(name))
    }

    /// Read the bytes behind a reference
    pub async fn read(&self, reference: &StorageReference) -> Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(reference.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a readable file currently backs the reference
    pub async fn exists(&self, reference: &StorageReference) -> bool {
        match self.resolve(reference) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Delete the file behind a reference. An already absent file is not an error.
    pub async fn remove(&self, reference: &StorageReference) -> Result<Removal> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(reference = %reference, "Blob removed");
                Ok(Removal::Removed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(reference = %reference, "Blob already absent");
                Ok(Removal::Missing)
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_and_sync(file: &mut File, content: &[u8]) -> std::io::Result<()> {
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await
}

/// A single path segment that cannot escape the root
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
