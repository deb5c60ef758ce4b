//! Error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Template for the "page not found" page.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {}

/// Template for the "server error" page.
#[derive(Template, WebTemplate)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate {}

/// Renders the 404 page.
pub fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response()
}

/// Logs a server-side failure and renders the 500 page.
pub fn server_error_page(error: &AppError) -> Response {
    tracing::error!(error = %error, "Request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate {}).into_response()
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> Response {
    not_found_page()
}
