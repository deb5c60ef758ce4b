//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::errors::{not_found_page, server_error_page};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Responses
///
/// - `302 Found` with `Location` set to the original URL
/// - `404 Not Found` page if the short id is unknown
/// - `500` page if storage fails
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Response {
    match state.registry.resolve_short(&short_id).await {
        Ok(Some(link)) => match location(&link.original) {
            Some(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            None => server_error_page(&AppError::storage(format!(
                "Stored URL of {} cannot be used as a Location header",
                link.short
            ))),
        },
        Ok(None) => {
            tracing::debug!(short = %short_id, "Unknown short id");
            not_found_page()
        }
        Err(e) => server_error_page(&e),
    }
}

/// Builds the `Location` header value for an original URL.
///
/// Non-ASCII URLs are re-serialized through [`url::Url`], which punycodes the
/// host and percent-encodes the rest. Values that do not parse as URLs are used
/// as stored.
fn location(original: &str) -> Option<HeaderValue> {
    if !original.is_ascii() {
        if let Ok(parsed) = url::Url::parse(original) {
            return HeaderValue::from_str(parsed.as_str()).ok();
        }
    }

    HeaderValue::from_str(original).ok()
}
