//! Reference data queries

use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

/// Genre record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

/// Reference data repository
pub struct ReferenceRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> ReferenceRepository<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List all genres
    pub async fn list_genres(&self) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT CAST(id AS CHAR) AS id, name FROM genres")
            .fetch_all(self.pool)
            .await
    }

    /// Most recently recorded schema version
    pub async fn latest_version(&self) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT version FROM versions ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_one(self.pool)
        .await
    }
}
