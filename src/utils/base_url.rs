//! Base URL resolution for short links.

use crate::AppError;
use axum::http::{HeaderMap, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Resolves the base URL that short links are appended to.
///
/// A configured base URL wins. Otherwise the base is built from the request:
/// `{scheme}://{host}`, where `host` is the `Host` header (port included) and
/// `scheme` is `X-Forwarded-Proto` when it says `https`, `http` otherwise.
/// The result never ends with `/`.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if no base URL is configured and:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8 or a `/`
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "example.com:8080".parse().unwrap());
///
/// let base = resolve_base_url(&headers, None).unwrap();
/// assert_eq!(base, "http://example.com:8080");
/// ```
pub fn resolve_base_url(headers: &HeaderMap, configured: Option<&str>) -> Result<String, AppError> {
    if let Some(base_url) = configured {
        return Ok(base_url.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::invalid_input("Missing Host header"))?
        .to_str()
        .map_err(|_| AppError::invalid_input("Invalid Host header"))?
        .trim();

    if host.is_empty() || host.contains('/') {
        return Err(AppError::invalid_input("Invalid Host header"));
    }

    let scheme = match headers.get(FORWARDED_PROTO).and_then(|v| v.to_str().ok()) {
        Some(proto) if proto.trim().eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };

    Ok(format!("{scheme}://{host}"))
}
