//! Image files attached to store and product forms.

use crate::error::{ensure, CommerceError};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_SIZE: usize = 1024 * 1024;

/// MIME types accepted for images.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// An image picked by the operator, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Check size and type.
    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(
            self.bytes.len() <= MAX_IMAGE_SIZE,
            "File size must be less than 1MB",
        )?;
        ensure(
            ACCEPTED_IMAGE_TYPES.contains(&self.content_type.to_ascii_lowercase().as_str()),
            "Only .jpg, .jpeg, .png and .webp formats are supported.",
        )
    }
}
