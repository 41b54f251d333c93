//! Error types for the blob store

use std::fmt;

#[derive(Debug)]
pub enum BlobStoreError {
    Io(Box<std::io::Error>),
    /// Generated or supplied filename is not a single plain path segment
    InvalidName(String),
    /// Reference does not point inside the managed root
    InvalidReference(String),
    NotFound(String),
}

impl fmt::Display for BlobStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobStoreError::Io(err) => write!(f, "IO error: {}", err),
            BlobStoreError::InvalidName(name) => write!(f, "Invalid file name: {}", name),
            BlobStoreError::InvalidReference(reference) => {
                write!(f, "Invalid storage reference: {}", reference)
            }
            BlobStoreError::NotFound(reference) => write!(f, "Blob not found: {}", reference),
        }
    }
}

impl std::error::Error for BlobStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlobStoreError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlobStoreError {
    fn from(err: std::io::Error) -> Self {
        BlobStoreError::Io(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, BlobStoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_reference_display() {
        let err = BlobStoreError::InvalidReference("/etc/passwd".to_string());
        assert_eq!(format!("{}", err), "Invalid storage reference: /etc/passwd");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = BlobStoreError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert!(format!("{}", err).contains("read-only"));
        assert!(err.source().is_some());
    }
}
