//! Configuration management for the Archives Transfer server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::upload::{DEFAULT_MAX_REQUEST_BYTES, DEFAULT_STALE_HOURS};

const DEFAULT_MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub database: DatabaseConfig,
    /// Dev-mode override for the authenticated user
    pub dev_auth_user: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Root directory holding one subdirectory per submission
    pub dir: PathBuf,
    /// Body limit for `/upload` requests
    pub max_request_bytes: usize,
    /// Hours before an untouched chunked upload session is forgotten
    pub stale_after_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Split a `host[:port]` value the way MySQL DSNs write it
    pub fn parse_host(value: &str) -> (String, u16) {
        match value.rsplit_once(':') {
            Some((host, port)) => match port.parse() {
                Ok(port) => (host.to_string(), port),
                Err(_) => (value.to_string(), DEFAULT_MYSQL_PORT),
            },
            None => (value.to_string(), DEFAULT_MYSQL_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8085,
            },
            upload: UploadConfig {
                dir: PathBuf::from("./uploads"),
                max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
                stale_after_hours: DEFAULT_STALE_HOURS,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: DEFAULT_MYSQL_PORT,
                user: "transfer".to_string(),
                password: "transfer".to_string(),
                name: "transfer".to_string(),
            },
            dev_auth_user: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let (db_host, db_port) = DatabaseConfig::parse_host(&env::var("DB_HOST")?);

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8085".to_string())
                    .parse()
                    .unwrap_or(8085),
            },
            upload: UploadConfig {
                dir: PathBuf::from(env::var("UPLOAD_DIR")?),
                max_request_bytes: env::var("UPLOAD_MAX_REQUEST_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_REQUEST_BYTES),
                stale_after_hours: env::var("UPLOAD_STALE_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_STALE_HOURS),
            },
            database: DatabaseConfig {
                host: db_host,
                port: db_port,
                user: env::var("DB_USER")?,
                password: env::var("DB_PASS")?,
                name: env::var("DB_NAME")?,
            },
            dev_auth_user: env::var("DEV_AUTH_USER").ok().filter(|v| !v.is_empty()),
        })
    }
}
