//! Error type shared by the storage ports.

use thiserror::Error;

/// Failure reported by a repository or ledger adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A unique constraint rejected the write.
    #[error("Duplicate {0}")]
    Duplicate(String),

    /// Row to update does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The row changed since it was read.
    #[error("Conflicting write: {0}")]
    Conflict(String),

    /// Stored data could not be mapped back into the domain.
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    /// The store could not be reached or failed the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        StorageError::Corrupt(message.into())
    }
}

impl From<StorageError> for crate::domain::purchase::PurchaseError {
    fn from(err: StorageError) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<StorageError> for crate::domain::purchase::WebhookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<StorageError> for crate::domain::enrollment::EnrollmentError {
    fn from(err: StorageError) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<StorageError> for crate::domain::account::AccountError {
    fn from(err: StorageError) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<StorageError> for crate::domain::catalog::CatalogError {
    fn from(err: StorageError) -> Self {
        Self::infrastructure(err.to_string())
    }
}
