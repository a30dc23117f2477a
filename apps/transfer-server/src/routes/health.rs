//! Version and health check endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::ReferenceRepository;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub alive: bool,
    pub mysql: bool,
}

/// Create the version/health router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/version", get(version))
        .route("/healthcheck", get(health_check))
}

/// GET /version
pub async fn version() -> String {
    format!("Archives Transfer Service version {}", env!("CARGO_PKG_VERSION"))
}

/// GET /healthcheck
///
/// Healthy only if the latest schema version row can be read.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match ReferenceRepository::new(state.db()).latest_version().await {
        Ok(version) => {
            tracing::trace!(schema_version = %version, "Health check passed");
            (
                StatusCode::OK,
                Json(HealthResponse {
                    alive: true,
                    mysql: true,
                }),
            )
        }
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    alive: true,
                    mysql: false,
                }),
            )
        }
    }
}
