use crate::types::{InsertPhotoParams, PhotoRow, ReplaceFileParams, UpdatePhotoParams};
use sqlx::SqlitePool;

/// Insert a photo row and return its assigned id
pub async fn insert(pool: &SqlitePool, p: &InsertPhotoParams) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO photos (title, description, storage_reference, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&p.title)
    .bind(&p.description)
    .bind(&p.storage_reference)
    .bind(p.created_at)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get a single photo by id
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<PhotoRow>, sqlx::Error> {
    sqlx::query_as::<_, PhotoRow>(
        r#"
        SELECT id, title, description, storage_reference, created_at
        FROM photos
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List all photos, newest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<PhotoRow>, sqlx::Error> {
    sqlx::query_as::<_, PhotoRow>(
        r#"
        SELECT id, title, description, storage_reference, created_at
        FROM photos
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Update title and description only. Returns false when no row matched.
pub async fn update_metadata(
    pool: &SqlitePool,
    p: &UpdatePhotoParams,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE photos
        SET title = ?, description = ?
        WHERE id = ?
        "#,
    )
    .bind(&p.title)
    .bind(&p.description)
    .bind(p.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Point a row at a new file, compare-and-swap on the old reference.
/// Returns false when the row is gone or already points elsewhere.
pub async fn replace_file(pool: &SqlitePool, p: &ReplaceFileParams) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE photos
        SET title = ?, description = ?, storage_reference = ?
        WHERE id = ? AND storage_reference = ?
        "#,
    )
    .bind(&p.title)
    .bind(&p.description)
    .bind(&p.new_reference)
    .bind(p.id)
    .bind(&p.old_reference)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a photo. Returns false when no row matched.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM photos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Number of photo rows
pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM photos")
        .fetch_one(pool)
        .await
}
