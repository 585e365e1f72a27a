//! Shared JSON error body and status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Standard error response body: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidCredentials
        | ErrorCode::AlreadyPurchased
        | ErrorCode::AlreadyEnrolled
        | ErrorCode::AlreadyExists
        | ErrorCode::SignatureInvalid
        | ErrorCode::MalformedPayload => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound | ErrorCode::CourseNotFound | ErrorCode::EnrollmentNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::PaymentProviderError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Builds the response for a domain error, logging server-side failures.
pub fn error_response(status: StatusCode, code: ErrorCode, message: String) -> Response {
    if status.is_server_error() {
        tracing::error!(code = %code, message = %message, "Request failed");
    } else {
        tracing::debug!(code = %code, message = %message, "Request rejected");
    }
    (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_map_to_bad_request() {
        assert_eq!(status_for(ErrorCode::AlreadyPurchased), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::AlreadyEnrolled), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::AlreadyExists), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_entities_map_to_not_found() {
        assert_eq!(status_for(ErrorCode::EnrollmentNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::UserNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failures_map_to_500() {
        assert_eq!(
            status_for(ErrorCode::PaymentProviderError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(ErrorCode::DatabaseError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let body = serde_json::to_value(ErrorResponse::new("ALREADY_ENROLLED", "Already enrolled"))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "code": "ALREADY_ENROLLED", "message": "Already enrolled" })
        );
    }
}
