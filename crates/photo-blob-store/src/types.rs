//! Blob store types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Web-resolvable locator for a stored file, e.g. `/uploads/1700000000000000000.png`.
///
/// This is what gets persisted alongside a photo's metadata; it is never the
/// raw filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageReference(String);

impl StorageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Final path segment of the reference
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StorageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StorageReference {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl AsRef<str> for StorageReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of a remove request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The file was already gone
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let reference = StorageReference::new("/uploads/123.png");
        assert_eq!(reference.file_name(), "123.png");
        assert_eq!(StorageReference::new("bare.jpg").file_name(), "bare.jpg");
    }

    #[test]
    fn test_reference_serializes_as_plain_string() {
        let reference = StorageReference::new("/uploads/1.jpeg");
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, "\"/uploads/1.jpeg\"");

        let back: StorageReference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reference);
    }
}
