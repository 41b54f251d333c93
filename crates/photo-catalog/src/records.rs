//! Record store: persistence of photo metadata rows
//!
//! `SqliteRecordStore` is the production backend on top of `photo-db`;
//! `MemoryRecordStore` keeps rows in a map for tests and throwaway runs.

use crate::error::RecordStoreError;
use async_trait::async_trait;
use photo_db::{InsertPhotoParams, PhotoRow, ReplaceFileParams, SqlitePool, UpdatePhotoParams};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

pub type RecordResult<T> = std::result::Result<T, RecordStoreError>;

/// Single-row metadata operations. Each call is one atomic statement.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a row and return its new id
    async fn insert(&self, params: &InsertPhotoParams) -> RecordResult<i64>;

    async fn get(&self, id: i64) -> RecordResult<Option<PhotoRow>>;

    /// All rows, newest first
    async fn list(&self) -> RecordResult<Vec<PhotoRow>>;

    /// Change title and description, leaving the storage reference alone.
    /// Returns false when no row has the given id.
    async fn update_metadata(&self, params: &UpdatePhotoParams) -> RecordResult<bool>;

    /// Swap the bound file, but only while the row still points at
    /// `old_reference`. Returns false when the row is gone or was re-pointed.
    async fn replace_file(&self, params: &ReplaceFileParams) -> RecordResult<bool>;

    /// Returns false when no row has the given id
    async fn delete(&self, id: i64) -> RecordResult<bool>;
}

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert(&self, params: &InsertPhotoParams) -> RecordResult<i64> {
        let id = photo_db::photos::insert(&self.pool, params).await?;
        debug!(id, reference = %params.storage_reference, "Inserted photo row");
        Ok(id)
    }

    async fn get(&self, id: i64) -> RecordResult<Option<PhotoRow>> {
        Ok(photo_db::photos::get(&self.pool, id).await?)
    }

    async fn list(&self) -> RecordResult<Vec<PhotoRow>> {
        Ok(photo_db::photos::list(&self.pool).await?)
    }

    async fn update_metadata(&self, params: &UpdatePhotoParams) -> RecordResult<bool> {
        Ok(photo_db::photos::update_metadata(&self.pool, params).await?)
    }

    async fn replace_file(&self, params: &ReplaceFileParams) -> RecordResult<bool> {
        Ok(photo_db::photos::replace_file(&self.pool, params).await?)
    }

    async fn delete(&self, id: i64) -> RecordResult<bool> {
        Ok(photo_db::photos::delete(&self.pool, id).await?)
    }
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    rows: BTreeMap<i64, PhotoRow>,
}

/// In-memory record store with the same semantics as the SQLite table,
/// including unique storage references.
#[derive(Default)]
pub struct MemoryRecordStore {
    state: RwLock<MemoryState>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn reference_taken(state: &MemoryState, reference: &str, except: Option<i64>) -> bool {
    state
        .rows
        .values()
        .any(|row| row.storage_reference == reference && Some(row.id) != except)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, params: &InsertPhotoParams) -> RecordResult<i64> {
        let mut state = self.state.write().await;
        if reference_taken(&state, &params.storage_reference, None) {
            return Err(RecordStoreError::Unavailable(format!(
                "duplicate storage reference {}",
                params.storage_reference
            )));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.rows.insert(
            id,
            PhotoRow {
                id,
                title: params.title.clone(),
                description: params.description.clone(),
                storage_reference: params.storage_reference.clone(),
                created_at: params.created_at,
            },
        );
        Ok(id)
    }

    async fn get(&self, id: i64) -> RecordResult<Option<PhotoRow>> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> RecordResult<Vec<PhotoRow>> {
        let state = self.state.read().await;
        let mut rows: Vec<PhotoRow> = state.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn update_metadata(&self, params: &UpdatePhotoParams) -> RecordResult<bool> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&params.id) {
            Some(row) => {
                row.title = params.title.clone();
                row.description = params.description.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_file(&self, params: &ReplaceFileParams) -> RecordResult<bool> {
        let mut state = self.state.write().await;
        if reference_taken(&state, &params.new_reference, Some(params.id)) {
            return Err(RecordStoreError::Unavailable(format!(
                "duplicate storage reference {}",
                params.new_reference
            )));
        }
        match state.rows.get_mut(&params.id) {
            Some(row) if row.storage_reference == params.old_reference => {
                row.title = params.title.clone();
                row.description = params.description.clone();
                row.storage_reference = params.new_reference.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> RecordResult<bool> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }
}
