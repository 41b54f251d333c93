//! Photo asset lifecycle
//!
//! Keeps the blob store and the record store consistent across create,
//! update and delete. The two stores share no transaction, so consistency
//! comes from ordering:
//!
//! - create: validate, write file, insert row (file removed if the insert fails)
//! - replace: validate, write new file, commit row, remove old file
//!   (the commit only lands if the row still points at the file read earlier)
//! - delete: remove file, delete row, both attempted regardless
//!
//! A row never points at a file that has not been durably written. The worst
//! a crash can leave behind is an orphaned file with no row.

use crate::error::{CatalogError, Result};
use crate::records::RecordStore;
use crate::types::{PhotoView, UploadedFile};
use crate::validation::UploadPolicy;
use chrono::Utc;
use photo_blob_store::{BlobStore, Removal, StorageReference};
use photo_db::{InsertPhotoParams, PhotoRow, ReplaceFileParams, UpdatePhotoParams};
use std::sync::Arc;
use tracing::{info, warn};

pub struct PhotoLifecycle {
    policy: UploadPolicy,
    blobs: BlobStore,
    records: Arc<dyn RecordStore>,
}

impl PhotoLifecycle {
    pub fn new(policy: UploadPolicy, blobs: BlobStore, records: Arc<dyn RecordStore>) -> Self {
        Self {
            policy,
            blobs,
            records,
        }
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Store a new photo and return its id
    pub async fn create(&self, title: &str, description: &str, file: &UploadedFile) -> Result<i64> {
        let ext = self.policy.validate(&file.file_name, file.size())?;

        let reference = self.store_file(ext.as_str(), file).await?;

        let params = InsertPhotoParams {
            title: title.to_string(),
            description: description.to_string(),
            storage_reference: reference.to_string(),
            created_at: Utc::now(),
        };
        let id = match self.records.insert(&params).await {
            Ok(id) => id,
            Err(e) => {
                self.discard(&reference, "insert failed").await;
                return Err(e.into());
            }
        };

        info!(id, reference = %reference, size = file.size(), "Photo created");
        Ok(id)
    }

    /// All photos, newest first, with display dates
    pub async fn list(&self) -> Result<Vec<PhotoView>> {
        let rows = self.records.list().await?;
        Ok(rows.into_iter().map(PhotoView::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<PhotoRow> {
        self.records
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Change title and description, optionally replacing the bound file
    pub async fn update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        file: Option<&UploadedFile>,
    ) -> Result<()> {
        let Some(file) = file else {
            let params = UpdatePhotoParams {
                id,
                title: title.to_string(),
                description: description.to_string(),
            };
            if !self.records.update_metadata(&params).await? {
                return Err(CatalogError::NotFound(id));
            }
            info!(id, "Photo metadata updated");
            return Ok(());
        };

        let existing = self.get(id).await?;
        let ext = self.policy.validate(&file.file_name, file.size())?;
        let new_reference = self.store_file(ext.as_str(), file).await?;

        let params = ReplaceFileParams {
            id,
            title: title.to_string(),
            description: description.to_string(),
            old_reference: existing.storage_reference,
            new_reference: new_reference.to_string(),
        };
        match self.records.replace_file(&params).await {
            Ok(true) => {}
            Ok(false) => {
                self.discard(&new_reference, "photo changed during update")
                    .await;
                return match self.records.get(id).await? {
                    Some(_) => Err(CatalogError::Conflict(id)),
                    None => Err(CatalogError::NotFound(id)),
                };
            }
            Err(e) => {
                self.discard(&new_reference, "update failed").await;
                return Err(e.into());
            }
        }

        let old_reference = StorageReference::new(params.old_reference);
        if let Err(e) = self.blobs.remove(&old_reference).await {
            warn!(id, reference = %old_reference, error = %e, "Failed to remove replaced file");
        }

        info!(id, old = %old_reference, new = %new_reference, "Photo file replaced");
        Ok(())
    }

    /// Remove a photo's file and row. Both halves are always attempted.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let existing = self.get(id).await?;
        let reference = StorageReference::new(existing.storage_reference);

        let file_result = self.blobs.remove(&reference).await;
        if let Ok(Removal::Missing) = file_result {
            warn!(id, reference = %reference, "File already absent while deleting photo");
        }
        let record_result = self.records.delete(id).await;

        match (file_result, record_result) {
            (Ok(_), Ok(_)) => {
                info!(id, reference = %reference, "Photo deleted");
                Ok(())
            }
            (_, Err(e)) => Err(CatalogError::StorageDeleteFailed(format!(
                "failed to delete record {}: {}",
                id, e
            ))),
            (Err(e), Ok(_)) => Err(CatalogError::StorageDeleteFailed(format!(
                "record {} deleted but file {} was not removed: {}",
                id, reference, e
            ))),
        }
    }

    async fn store_file(&self, extension: &str, file: &UploadedFile) -> Result<StorageReference> {
        let filename = self.blobs.generate_name(extension);
        self.blobs
            .write(&filename, &file.content)
            .await
            .map_err(CatalogError::StorageWriteFailed)
    }

    /// Best-effort removal of a file that never got a committed row
    async fn discard(&self, reference: &StorageReference, reason: &str) {
        match self.blobs.remove(reference).await {
            Ok(_) => warn!(reference = %reference, reason, "Discarded uncommitted file"),
            Err(e) => {
                warn!(reference = %reference, reason, error = %e, "Failed to discard uncommitted file")
            }
        }
    }
}
