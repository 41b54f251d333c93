//! Upload validation
//!
//! Pure decision over a declared filename and size; no I/O happens here, so
//! a rejected upload never reaches the disk.

use crate::error::ValidationError;

/// Default size ceiling: 2 MiB
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 2 << 20;

/// Accepted image extensions, keeping the spelling the client used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExtension {
    Jpg,
    Jpeg,
    Png,
}

impl ImageExtension {
    /// Extension with its leading dot, lower-cased
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExtension::Jpg => ".jpg",
            ImageExtension::Jpeg => ".jpeg",
            ImageExtension::Png => ".png",
        }
    }

    fn parse(ext: &str) -> Option<Self> {
        match ext {
            ".jpg" => Some(ImageExtension::Jpg),
            ".jpeg" => Some(ImageExtension::Jpeg),
            ".png" => Some(ImageExtension::Png),
            _ => None,
        }
    }
}

/// Format and size policy applied to every incoming file
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl UploadPolicy {
    pub fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Accept or reject a file. Format is checked before size.
    pub fn validate(
        &self,
        filename: &str,
        declared_size: u64,
    ) -> Result<ImageExtension, ValidationError> {
        let ext = extension_of(filename).map(str::to_ascii_lowercase);
        let Some(image_ext) = ext.as_deref().and_then(ImageExtension::parse) else {
            return Err(ValidationError::UnsupportedFormat(ext));
        };

        if declared_size > self.max_size {
            return Err(ValidationError::TooLarge {
                size: declared_size,
                max: self.max_size,
            });
        }

        Ok(image_ext)
    }
}

/// Suffix of the last path component starting at its final dot
fn extension_of(filename: &str) -> Option<&str> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.rfind('.').map(|idx| &base[idx..])
}
