//! Payment proof screenshot storage on the local filesystem.
//!
//! Shoppers attach a screenshot of their wallet transfer during checkout.
//! Files land under the configured uploads directory and are served back
//! through the static uploads route.

use std::path::PathBuf;

use kinmel_core::{UploadError, UploadPolicy};
use uuid::Uuid;

/// Error storing a payment proof.
#[derive(Debug, thiserror::Error)]
pub enum ProofStoreError {
    #[error("upload rejected: {0}")]
    Rejected(#[from] UploadError),
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed store for payment proof screenshots.
#[derive(Clone)]
pub struct FsProofStore {
    dir: PathBuf,
    public_base: String,
    policy: UploadPolicy,
}

impl FsProofStore {
    #[must_use]
    pub fn new(dir: PathBuf, public_base: String) -> Self {
        Self {
            dir,
            public_base,
            policy: UploadPolicy::images(),
        }
    }

    /// Validate and persist a screenshot, returning its public URL.
    ///
    /// # Errors
    ///
    /// Returns `ProofStoreError::Rejected` if the file violates the image
    /// upload policy and `ProofStoreError::Io` if the write fails.
    pub async fn store(&self, content_type: &str, data: &[u8]) -> Result<String, ProofStoreError> {
        self.policy.check(content_type, data.len() as u64)?;

        let ext = UploadPolicy::extension_for(content_type);
        // Date-scoped subdirectory keeps any one directory small
        let scope = chrono::Utc::now().format("%Y/%m").to_string();
        let filename = format!("proof-{}.{ext}", Uuid::new_v4());

        let dir = self.dir.join(&scope);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), data).await?;

        Ok(format!(
            "{}/{scope}/{filename}",
            self.public_base.trim_end_matches('/')
        ))
    }
}
