//! Webhook error types for payment event reconciliation.
//!
//! Every rejection is answered with 400, which keeps the event in the
//! provider's redelivery schedule. An event that was not durably recorded
//! is never acknowledged.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors that occur during webhook verification and reconciliation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WebhookError {
    /// No signature header accompanied the request.
    #[error("Missing signature header")]
    MissingSignature,

    /// Signature header could not be parsed.
    #[error("Malformed signature header: {0}")]
    MalformedSignature(String),

    /// No signature in the header matches the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Verified body is not a valid provider event.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Ledger write failed; the event was not recorded.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    /// True for every failure that means the event is not authentic.
    pub fn is_signature_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature
                | WebhookError::MalformedSignature(_)
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
        )
    }

    /// Returns true if a redelivery of the same event may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Storage(_))
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WebhookError::MalformedPayload(_) => ErrorCode::MalformedPayload,
            WebhookError::Storage(_) => ErrorCode::DatabaseError,
            _ => ErrorCode::SignatureInvalid,
        }
    }

    /// Maps the error to the HTTP status returned to the provider.
    ///
    /// Always 400.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
