//! Error types for the photo catalog

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use photo_blob_store::BlobStoreError;
use std::fmt;

/// Why an upload was refused before anything touched the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Extension outside the allow-list, or no extension at all
    UnsupportedFormat(Option<String>),
    TooLarge { size: u64, max: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedFormat(Some(ext)) => write!(
                f,
                "Unsupported file format '{}': only .jpg, .jpeg and .png are accepted",
                ext
            ),
            ValidationError::UnsupportedFormat(None) => write!(
                f,
                "Unsupported file format: only .jpg, .jpeg and .png are accepted"
            ),
            ValidationError::TooLarge { size, max } => write!(
                f,
                "File too large: {} bytes exceeds the {} byte limit",
                size, max
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure inside a record store backend
#[derive(Debug)]
pub enum RecordStoreError {
    Database(Box<sqlx::Error>),
    Unavailable(String),
}

impl fmt::Display for RecordStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStoreError::Database(err) => write!(f, "Database error: {}", err),
            RecordStoreError::Unavailable(msg) => write!(f, "Record store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for RecordStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordStoreError::Database(err) => Some(err.as_ref()),
            RecordStoreError::Unavailable(_) => None,
        }
    }
}

impl From<sqlx::Error> for RecordStoreError {
    fn from(err: sqlx::Error) -> Self {
        RecordStoreError::Database(Box::new(err))
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Validation(ValidationError),
    NotFound(i64),
    /// The row's file was replaced by another request mid-update
    Conflict(i64),
    StorageWriteFailed(BlobStoreError),
    StorageDeleteFailed(String),
    RecordStoreFailed(RecordStoreError),
    Config(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(err) => write!(f, "Validation error: {}", err),
            CatalogError::NotFound(id) => write!(f, "Photo {} not found", id),
            CatalogError::Conflict(id) => write!(f, "Photo {} was modified concurrently", id),
            CatalogError::StorageWriteFailed(err) => write!(f, "Storage write failed: {}", err),
            CatalogError::StorageDeleteFailed(msg) => write!(f, "Storage delete failed: {}", msg),
            CatalogError::RecordStoreFailed(err) => write!(f, "Record store failed: {}", err),
            CatalogError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Validation(err) => Some(err),
            CatalogError::StorageWriteFailed(err) => Some(err),
            CatalogError::RecordStoreFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err)
    }
}

impl From<RecordStoreError> for CatalogError {
    fn from(err: RecordStoreError) -> Self {
        CatalogError::RecordStoreFailed(err)
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::RecordStoreFailed(err.into())
    }
}

impl From<tracing_subscriber::filter::ParseError> for CatalogError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CatalogError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// HTTP-facing error; each variant maps to one status code
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => AppError::BadRequest(e.to_string()),
            CatalogError::NotFound(_) => AppError::NotFound("Photo not found".into()),
            CatalogError::Conflict(_) => {
                AppError::Conflict("Photo was changed by another request, try again".into())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
