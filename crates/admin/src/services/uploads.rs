//! Filesystem storage for catalog and content images.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use kinmel_core::{UploadError, UploadPolicy};

use crate::config::UploadsConfig;

/// Errors from storing an uploaded image.
#[derive(Debug, Error)]
pub enum UploadStoreError {
    /// The file failed the upload policy.
    #[error(transparent)]
    Rejected(#[from] UploadError),

    /// Writing the file to disk failed.
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes admin image uploads under the configured directory and
/// returns the public URL they are served at.
#[derive(Clone)]
pub struct FsUploadStore {
    dir: PathBuf,
    public_base: String,
    policy: UploadPolicy,
}

impl FsUploadStore {
    #[must_use]
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            public_base: config.public_base.trim_end_matches('/').to_owned(),
            policy: UploadPolicy::images(),
        }
    }

    /// Validate and persist an uploaded image, returning its public URL.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the content type or size fails the image
    /// policy, `Io` when the file cannot be written.
    pub async fn store(
        &self,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, UploadStoreError> {
        self.policy.check(content_type, data.len() as u64)?;

        let extension = UploadPolicy::extension_for(content_type);
        // Date-scoped subdirectory keeps any one directory small
        let scope = chrono::Utc::now().format("%Y/%m").to_string();
        let filename = format!("img-{}.{extension}", Uuid::new_v4());

        let dir = self.dir.join(&scope);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), data).await?;

        Ok(format!("{}/{scope}/{filename}", self.public_base))
    }
}
