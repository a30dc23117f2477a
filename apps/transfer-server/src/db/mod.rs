//! Database module for the MySQL reference store
//!
//! Read-only access to genres and the schema version table used for health.

mod reference;

pub use reference::*;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Create a lazily connecting pool.
///
/// No connection is opened here, so the server starts while the store is
/// down and the health check reports it.
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    MySqlPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options)
}
