//! Catalog-specific error types.

use crate::domain::foundation::{CourseId, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    ValidationFailed { field: String, message: String },
    NotFound(CourseId),
    Infrastructure(String),
}

impl CatalogError {
    pub fn not_found(id: CourseId) -> Self {
        CatalogError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::NotFound(_) => ErrorCode::CourseNotFound,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::NotFound(_) => "Course not found".to_string(),
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
