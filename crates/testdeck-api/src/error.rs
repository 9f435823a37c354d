//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use testdeck_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Newtype carrying [`AppError`] across the Axum boundary.
///
/// The orphan rule forbids implementing the foreign [`IntoResponse`]
/// trait for the foreign `AppError` directly; handlers return this
/// wrapper instead and `?` converts into it via `From`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::IllegalMove => (StatusCode::UNPROCESSABLE_ENTITY, "ILLEGAL_MOVE"),
            ErrorKind::Transport => (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR"),
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %self.0.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message.clone(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_error_kind_status_mapping() {
        assert_eq!(
            status_of(AppError::validation("bad name")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::not_found("no such folder")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::conflict("duplicate name")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::illegal_move("into own subtree")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::database("connection lost")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_skips_empty_details() {
        let body = ApiErrorResponse {
            error: "NOT_FOUND".to_string(),
            message: "Folder not found".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["error"], "NOT_FOUND");
    }
}
