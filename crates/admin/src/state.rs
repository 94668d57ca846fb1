//! Application state shared across admin handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::{CredentialDelivery, FsUploadStore};

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    uploads: FsUploadStore,
    delivery: CredentialDelivery,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let uploads = FsUploadStore::new(&config.uploads);
        let delivery = CredentialDelivery::new(
            reqwest::Client::new(),
            config.credential_delivery.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploads,
                delivery,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn uploads(&self) -> &FsUploadStore {
        &self.inner.uploads
    }

    #[must_use]
    pub fn delivery(&self) -> &CredentialDelivery {
        &self.inner.delivery
    }
}
