//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{create_link_form_handler, index_handler, redirect_handler};
use axum::{Router, routing::get};

/// Public HTML routes.
///
/// # Endpoints
///
/// - `GET  /`            - Link creation form
/// - `POST /`            - Form submission
/// - `GET  /{short_id}`  - Redirect to the original URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler).post(create_link_form_handler))
        .route("/{short_id}", get(redirect_handler))
}
