//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::HomeContent;
use crate::services::proofs::FsProofStore;

/// How long the assembled home page content stays cached.
const HOME_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    proofs: FsProofStore,
    home_cache: Cache<&'static str, Arc<HomeContent>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let proofs = FsProofStore::new(
            config.uploads.dir.clone(),
            config.uploads.public_base.clone(),
        );
        let home_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(HOME_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                proofs,
                home_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the payment proof store.
    #[must_use]
    pub fn proofs(&self) -> &FsProofStore {
        &self.inner.proofs
    }

    /// Get a reference to the home page content cache.
    #[must_use]
    pub fn home_cache(&self) -> &Cache<&'static str, Arc<HomeContent>> {
        &self.inner.home_cache
    }
}
