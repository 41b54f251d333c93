use crate::validation::DEFAULT_MAX_UPLOAD_SIZE;
use std::env;
use std::path::PathBuf;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Directory holding uploaded files
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under
    pub public_prefix: String,
    pub max_upload_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite://photos.db".to_string(),
            upload_dir: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Parse configuration from any key lookup, falling back to defaults
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let database_url = var("DATABASE_URL").unwrap_or(defaults.database_url);

        let upload_dir = var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let public_prefix = var("PUBLIC_PREFIX")
            .map(|p| format!("/{}", p.trim_matches('/')))
            .unwrap_or(defaults.public_prefix);

        let max_upload_size = var("MAX_UPLOAD_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_upload_size);

        Self {
            port,
            database_url,
            upload_dir,
            public_prefix,
            max_upload_size,
        }
    }
}
