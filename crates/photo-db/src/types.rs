use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Photo row returned from SELECT queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PhotoRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub storage_reference: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for inserting a photo row
#[derive(Debug, Clone)]
pub struct InsertPhotoParams {
    pub title: String,
    pub description: String,
    pub storage_reference: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for a metadata-only update. The storage reference and
/// `created_at` are never touched.
#[derive(Debug, Clone)]
pub struct UpdatePhotoParams {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Parameters for swapping a photo's bound file. Applies only while the row
/// still points at `old_reference`.
#[derive(Debug, Clone)]
pub struct ReplaceFileParams {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub old_reference: String,
    pub new_reference: String,
}
