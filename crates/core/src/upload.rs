//! Shared image upload policy.
//!
//! The legacy screens disagreed with each other: some admin uploads checked
//! size and MIME type, the checkout proof upload checked nothing. One policy
//! now applies everywhere an image crosses the boundary.

use serde::{Deserialize, Serialize};

/// Why an upload was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum UploadError {
    #[error("file is empty")]
    Empty,
    #[error("file is too large ({got} bytes, limit {max})")]
    TooLarge { max: u64, got: u64 },
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
}

/// Size and MIME constraints for an uploaded image.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_types: &'static [&'static str],
}

impl UploadPolicy {
    /// The policy for payment proofs and catalog images: at most 5 MiB,
    /// common web image types only.
    #[must_use]
    pub const fn images() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            allowed_types: &["image/png", "image/jpeg", "image/webp", "image/gif"],
        }
    }

    /// Maximum accepted size in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validate an upload's declared content type and size.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when the file is empty, over the size limit,
    /// or not an accepted image type.
    pub fn check(&self, content_type: &str, len: u64) -> Result<(), UploadError> {
        if len == 0 {
            return Err(UploadError::Empty);
        }
        if len > self.max_bytes {
            return Err(UploadError::TooLarge {
                max: self.max_bytes,
                got: len,
            });
        }
        // Ignore any parameters like "; charset="
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_ascii_lowercase();
        if !self.allowed_types.contains(&essence.as_str()) {
            return Err(UploadError::UnsupportedType(content_type.to_owned()));
        }
        Ok(())
    }

    /// File extension for an accepted content type.
    #[must_use]
    pub fn extension_for(content_type: &str) -> &'static str {
        match content_type {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_small_png() {
        assert!(UploadPolicy::images().check("image/png", 1024).is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            UploadPolicy::images().check("image/png", 0),
            Err(UploadError::Empty)
        );
    }

    #[test]
    fn test_rejects_over_limit() {
        let policy = UploadPolicy::images();
        let too_big = policy.max_bytes() + 1;
        assert!(matches!(
            policy.check("image/jpeg", too_big),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_exactly_at_limit_is_ok() {
        let policy = UploadPolicy::images();
        assert!(policy.check("image/jpeg", policy.max_bytes()).is_ok());
    }

    #[test]
    fn test_rejects_non_image() {
        assert!(matches!(
            UploadPolicy::images().check("application/pdf", 100),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        assert!(
            UploadPolicy::images()
                .check("image/PNG; some=param", 100)
                .is_ok()
        );
    }

    #[test]
    fn test_extensions() {
        assert_eq!(UploadPolicy::extension_for("image/jpeg"), "jpg");
        assert_eq!(UploadPolicy::extension_for("image/png"), "png");
    }
}
