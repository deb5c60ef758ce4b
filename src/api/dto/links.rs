//! DTOs for link creation and lookup endpoints.

use serde::{Deserialize, Serialize};

/// Request to create a short link.
///
/// `url` is optional at the type level so that a body without it produces a
/// dedicated error message instead of a generic deserialization failure.
/// `original` is accepted as an alias of `url`.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default, alias = "original")]
    pub url: Option<String>,

    /// Optional custom short id. Empty or whitespace-only values mean "generate one".
    #[serde(default)]
    pub custom_id: Option<String>,
}

impl CreateLinkRequest {
    /// Returns the trimmed custom id, or `None` when absent or blank.
    pub fn custom_id(&self) -> Option<&str> {
        self.custom_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub url: String,
    pub short_link: String,
}

/// Response for a resolved short id.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub url: String,
}
