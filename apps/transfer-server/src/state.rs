//! Application state management

use std::sync::Arc;

use sqlx::MySqlPool;

use crate::config::Config;
use crate::upload::{LocalUploadStorage, Reassembler, SessionManager, UploadStorage};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pub config: Config,
    pub db: MySqlPool,
    pub reassembler: Reassembler,
}

impl AppState {
    /// Create application state storing uploads under `config.upload.dir`
    pub fn new(config: Config, db: MySqlPool) -> Self {
        let storage = Arc::new(LocalUploadStorage::new(config.upload.dir.clone()));
        Self::with_storage(config, db, storage)
    }

    /// Create application state with a custom storage backend
    pub fn with_storage(config: Config, db: MySqlPool, storage: Arc<dyn UploadStorage>) -> Self {
        let sessions = SessionManager::with_stale_after(config.upload.stale_after_hours);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                reassembler: Reassembler::new(storage, sessions),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &MySqlPool {
        &self.inner.db
    }

    /// Get the upload reassembler
    pub fn reassembler(&self) -> &Reassembler {
        &self.inner.reassembler
    }
}

/// State rooted at `upload_dir` with a pool pointing at a closed port
#[cfg(test)]
pub(crate) fn test_state(upload_dir: &std::path::Path) -> AppState {
    use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

    let mut config = Config::default();
    config.upload.dir = upload_dir.to_path_buf();

    let options = MySqlConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("transfer")
        .database("transfer");
    let db = MySqlPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(250))
        .connect_lazy_with(options);

    AppState::new(config, db)
}
