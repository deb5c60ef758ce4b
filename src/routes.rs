//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`              - Link creation form
//! - `POST /`              - Form submission
//! - `GET  /{short_id}`    - Short link redirect
//! - `/api/*`              - JSON API
//! - anything else         - HTML 404 page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing as trace_middleware;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Requests must use canonical paths, e.g. `/api/id` rather than `/api/id/`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .nest("/api", api::routes::routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(trace_middleware::layer())
}

/// Constructs the application service.
///
/// Wraps [`router`] so that trailing slashes are trimmed before routing;
/// `/api/id/` and `/api/id` are the same endpoint.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
