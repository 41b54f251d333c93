//! Flat-directory blob store for uploaded photos
//!
//! Stores image bytes under a single managed root directory and hands out
//! web-facing storage references (`/uploads/<name>`) that resolve back to the
//! physical file. Filenames are generated from a strictly increasing
//! nanosecond stamp, so concurrent writers never need a lock to stay unique.

mod error;
mod store;
mod types;

pub use error::{BlobStoreError, Result};
pub use store::BlobStore;
pub use types::{Removal, StorageReference};
