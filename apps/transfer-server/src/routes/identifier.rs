//! Submission identifier issuing

use axum::{routing::get, Router};
use uuid::Uuid;

use crate::state::AppState;

/// Create the identifier router
pub fn router() -> Router<AppState> {
    Router::new().route("/identifier", get(new_identifier))
}

/// GET /identifier
///
/// The token doubles as the submission's upload directory name.
async fn new_identifier() -> String {
    let id = Uuid::new_v4().simple().to_string();
    tracing::debug!(identifier = %id, "Issued submission identifier");
    id
}
