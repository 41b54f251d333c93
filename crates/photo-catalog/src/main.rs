//! Photo Catalog - upload, list, edit and delete photos
//!
//! Stores image files in a flat upload directory and their metadata in
//! SQLite, serving both over HTTP.

use photo_blob_store::BlobStore;
use photo_catalog::{
    start_server, CatalogError, Config, PhotoLifecycle, Result, ServerState, SharedState,
    SqliteRecordStore, UploadPolicy,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("photo_catalog=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Photo Catalog...");

    let config = Config::from_env();
    info!("Port: {}", config.port);
    info!("Upload dir: {:?}", config.upload_dir);
    info!("Public prefix: {}", config.public_prefix);
    info!("Max upload size: {} bytes", config.max_upload_size);

    let blobs = BlobStore::new(&config.upload_dir, &config.public_prefix);
    blobs
        .init()
        .await
        .map_err(|e| CatalogError::Config(format!("Failed to create upload directory: {}", e)))?;

    let pool = photo_db::connect(&config.database_url, 5).await?;
    photo_db::migrate::migrate(&pool).await?;

    let photos = PhotoLifecycle::new(
        UploadPolicy::new(config.max_upload_size),
        blobs,
        Arc::new(SqliteRecordStore::new(pool)),
    );
    let state: SharedState = Arc::new(ServerState::new(photos));

    start_server(state, config.port)
        .await
        .map_err(|e| CatalogError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
