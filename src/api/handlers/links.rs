//! Handlers for link creation and lookup endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse, LookupResponse};
use crate::application::services::LinkRegistry;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/id/`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "custom_id": "example"
/// }
/// ```
///
/// Only the length and emptiness of `url` are checked here; the web form adds a
/// URL syntax check on top.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "url": "https://example.com",
///   "short_link": "http://localhost:3000/example"
/// }
/// ```
///
/// # Errors
///
/// - `400` if the body is missing or not JSON, a field has the wrong type, `url`
///   is absent or invalid, the custom id is malformed or already taken
/// - `500` if no free short id could be generated or storage fails
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected create request body");
        match rejection {
            JsonRejection::JsonDataError(_) => {
                AppError::invalid_input("\"url\" and \"custom_id\" must be strings")
            }
            _ => AppError::invalid_input("Request body is missing"),
        }
    })?;

    let url = payload
        .url
        .as_deref()
        .ok_or_else(|| AppError::invalid_input("\"url\" is a required field!"))?;

    let base_url = resolve_base_url(&headers, state.base_url.as_deref())?;

    let link = state
        .registry
        .create_link(url, payload.custom_id())
        .await?;

    let short_link = LinkRegistry::build_short_url(&link, &base_url);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            url: link.original,
            short_link,
        }),
    ))
}

/// Returns the original URL for a short id.
///
/// # Endpoint
///
/// `GET /api/id/{short_id}/`
///
/// # Errors
///
/// - `404` if the short id is unknown
/// - `500` if storage fails
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Result<Json<LookupResponse>, AppError> {
    let link = state
        .registry
        .resolve_short(&short_id)
        .await?
        .ok_or_else(|| AppError::not_found("The specified id was not found"))?;

    Ok(Json(LookupResponse { url: link.original }))
}
