pub mod migrate;
pub mod photos;
pub mod types;

pub use sqlx::sqlite::SqlitePool;
pub use types::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Open a pool for `database_url`, creating the database file if needed
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    info!("Connecting to database...");
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    info!("Database connection established");
    Ok(pool)
}

/// Single-connection pool over a private in-memory database
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    // Every in-memory connection is its own database, so the pool must not grow
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
}
