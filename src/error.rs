//! Application error type shared by the registry, storage and HTTP layers.
//!
//! Every failure the service can report is an [`AppError`] variant. The JSON API
//! renders them through [`IntoResponse`] as `{ "message": ... }` bodies; the HTML
//! handlers in [`crate::web`] map the same variants onto form errors and error pages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Errors surfaced by link creation and lookup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL or custom short id.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested short id is already taken.
    #[error("{0}")]
    Conflict(String),

    /// No free short id was found within the generation budget.
    #[error("Failed to generate a unique short id after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// The persistence layer failed.
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("{0}")]
    NotFound(String),
}

/// JSON body returned by the API for every error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure(message.into())
    }

    /// HTTP status used when the error reaches a client.
    ///
    /// Conflicts are reported as `400 Bad Request`, like any other user error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ExhaustedRetries { .. } | Self::StorageFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns true for failures caused by the service rather than the caller.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(match db.constraint() {
                Some(constraint) => format!("Unique constraint violation: {constraint}"),
                None => "Unique constraint violation".to_string(),
            });
        }

        AppError::storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_input("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::conflict("taken").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ExhaustedRetries { attempts: 10 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::storage("io").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_exhausted_retries_message() {
        let err = AppError::ExhaustedRetries { attempts: 10 };
        assert!(err.to_string().contains("10 attempts"));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_non_database_sqlx_error_is_storage_failure() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::StorageFailure(_)));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::conflict("taken").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::storage("down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
