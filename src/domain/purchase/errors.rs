//! Purchase-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | AlreadyPurchased | 400 |
//! | PaymentProvider | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{ErrorCode, ValidationError};

use super::CourseRef;

/// Errors raised by checkout and ledger operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseError {
    /// Request was missing a field or carried an invalid value.
    ValidationFailed { field: String, message: String },

    /// The ledger already holds a record for this user and course.
    AlreadyPurchased(CourseRef),

    /// The payment provider rejected or failed the call.
    PaymentProvider(String),

    /// Storage failure.
    Infrastructure(String),
}

impl PurchaseError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PurchaseError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn already_purchased(course_ref: CourseRef) -> Self {
        PurchaseError::AlreadyPurchased(course_ref)
    }

    pub fn payment_provider(message: impl Into<String>) -> Self {
        PurchaseError::PaymentProvider(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PurchaseError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PurchaseError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PurchaseError::AlreadyPurchased(_) => ErrorCode::AlreadyPurchased,
            PurchaseError::PaymentProvider(_) => ErrorCode::PaymentProviderError,
            PurchaseError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            PurchaseError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PurchaseError::AlreadyPurchased(_) => {
                "You have already purchased this course".to_string()
            }
            PurchaseError::PaymentProvider(msg) => format!("Payment provider error: {}", msg),
            PurchaseError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PurchaseError {}

impl From<ValidationError> for PurchaseError {
    fn from(err: ValidationError) -> Self {
        PurchaseError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
