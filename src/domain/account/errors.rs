//! Account-specific error types.

use crate::domain::foundation::{ErrorCode, UserId, ValidationError};

/// Errors raised by registration, login, and user lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    ValidationFailed { field: String, message: String },

    /// Registration email is already in use.
    EmailTaken,

    /// Unknown email or wrong password. Deliberately indistinguishable.
    InvalidCredentials,

    UserNotFound(UserId),

    /// Credential hashing or token issuance failed.
    Credentials(String),

    /// Storage failure, including exhausted login retries.
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found(user_id: UserId) -> Self {
        AccountError::UserNotFound(user_id)
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        AccountError::Credentials(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::EmailTaken => ErrorCode::AlreadyExists,
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::UserNotFound(_) => ErrorCode::UserNotFound,
            AccountError::Credentials(_) => ErrorCode::InternalError,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::EmailTaken => "User already exists".to_string(),
            AccountError::InvalidCredentials => "Invalid credentials".to_string(),
            AccountError::UserNotFound(_) => "User not found".to_string(),
            AccountError::Credentials(msg) => format!("Credential error: {}", msg),
            AccountError::Infrastructure(_) => {
                "Database operation failed, please try again".to_string()
            }
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
