//! Core types for the photo catalog

use bytes::Bytes;
use chrono::{DateTime, Utc};
use photo_db::PhotoRow;
use serde::Serialize;

/// Display format for upload timestamps, e.g. `05 Mar 2026 14:07`
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// A file received from a client, not yet validated
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// A photo as shown in listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub storage_reference: String,
    pub created_at: DateTime<Utc>,
    pub uploaded: String,
}

impl From<PhotoRow> for PhotoView {
    fn from(row: PhotoRow) -> Self {
        Self {
            uploaded: row.created_at.format(DISPLAY_DATE_FORMAT).to_string(),
            id: row.id,
            title: row.title,
            description: row.description,
            storage_reference: row.storage_reference,
            created_at: row.created_at,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_photo_view_formats_date() {
        let row = PhotoRow {
            id: 3,
            title: "Sunset".to_string(),
            description: "Beach".to_string(),
            storage_reference: "/uploads/1.png".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 30).unwrap(),
        };

        let view = PhotoView::from(row);
        assert_eq!(view.uploaded, "05 Mar 2026 14:07");
        assert_eq!(view.title, "Sunset");
        assert_eq!(view.storage_reference, "/uploads/1.png");
    }

    #[test]
    fn test_uploaded_file_size() {
        let file = UploadedFile::new("a.png", vec![0u8; 1234]);
        assert_eq!(file.size(), 1234);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            uptime_secs: 3600,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("3600"));
    }
}
