//! Enrollment-specific error types.

use crate::domain::foundation::{ErrorCode, UserId, ValidationError};

/// Errors raised by enroll and progress operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    ValidationFailed { field: String, message: String },

    /// Token refers to a user that no longer exists.
    UserNotFound(UserId),

    /// An entry with this title already exists.
    AlreadyEnrolled(String),

    /// No entry with this title exists.
    NotEnrolled(String),

    Infrastructure(String),
}

impl EnrollmentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EnrollmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found(user_id: UserId) -> Self {
        EnrollmentError::UserNotFound(user_id)
    }

    pub fn already_enrolled(title: impl Into<String>) -> Self {
        EnrollmentError::AlreadyEnrolled(title.into())
    }

    pub fn not_enrolled(title: impl Into<String>) -> Self {
        EnrollmentError::NotEnrolled(title.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EnrollmentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnrollmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EnrollmentError::UserNotFound(_) => ErrorCode::UserNotFound,
            EnrollmentError::AlreadyEnrolled(_) => ErrorCode::AlreadyEnrolled,
            EnrollmentError::NotEnrolled(_) => ErrorCode::EnrollmentNotFound,
            EnrollmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EnrollmentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EnrollmentError::UserNotFound(_) => "User not found".to_string(),
            EnrollmentError::AlreadyEnrolled(_) => "Already enrolled in this course".to_string(),
            EnrollmentError::NotEnrolled(_) => {
                "Course not found in user's enrolled courses".to_string()
            }
            EnrollmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EnrollmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EnrollmentError {}

impl From<ValidationError> for EnrollmentError {
    fn from(err: ValidationError) -> Self {
        EnrollmentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
