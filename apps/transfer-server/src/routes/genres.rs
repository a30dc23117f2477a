//! Genre reference data

use axum::{extract::State, routing::get, Json, Router};

use crate::db::{Genre, ReferenceRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the genres router
pub fn router() -> Router<AppState> {
    Router::new().route("/genres", get(list_genres))
}

/// GET /genres
async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>> {
    let genres = ReferenceRepository::new(state.db())
        .list_genres()
        .await
        .map_err(|e| AppError::Upstream(format!("Unable to retrieve genres: {}", e)))?;

    Ok(Json(genres))
}
