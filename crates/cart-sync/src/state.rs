//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::CartSyncConfig;
use crate::services::{SyncClient, SyncError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CartSyncConfig,
    pool: PgPool,
    sync: SyncClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Cart-sync configuration
    /// * `pool` - `PostgreSQL` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the merge API client cannot be built.
    pub fn new(config: CartSyncConfig, pool: PgPool) -> Result<Self, SyncError> {
        let sync = SyncClient::new(&config.sync_api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pool, sync }),
        })
    }

    /// Get a reference to the cart-sync configuration.
    #[must_use]
    pub fn config(&self) -> &CartSyncConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the cart merge API client.
    #[must_use]
    pub fn sync(&self) -> &SyncClient {
        &self.inner.sync
    }
}
