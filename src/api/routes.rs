//! API route configuration.

use crate::api::handlers::{create_link_handler, get_link_handler, health_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /id`              - Create a short link
/// - `GET  /id/{short_id}`   - Resolve a short id to its original URL
/// - `GET  /health`          - Storage health check
///
/// Trailing slashes are trimmed by the top-level router, so `/api/id/` and
/// `/api/id/{short_id}/` reach the same handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/id", post(create_link_handler))
        .route("/id/{short_id}", get(get_link_handler))
        .route("/health", get(health_handler))
}
