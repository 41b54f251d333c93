//! Photo Catalog Library
//!
//! Keeps uploaded photo files and their metadata rows consistent across
//! create, update and delete, and exposes them over a small HTTP surface.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod records;
pub mod render;
pub mod server;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::{AppError, CatalogError, RecordStoreError, Result, ValidationError};
pub use lifecycle::PhotoLifecycle;
pub use records::{MemoryRecordStore, RecordStore, SqliteRecordStore};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use types::*;
pub use validation::{ImageExtension, UploadPolicy};
