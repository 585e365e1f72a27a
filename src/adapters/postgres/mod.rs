//! PostgreSQL adapters - Database implementations of repository ports.
//!
//! - `PostgresUserRepository` - users with their enrollment list as JSONB
//! - `PostgresPurchaseLedger` - append-only purchase ledger
//! - `PostgresCourseRepository` - course catalog

mod course_repository;
mod purchase_ledger;
mod user_repository;

pub use course_repository::PostgresCourseRepository;
pub use purchase_ledger::{PostgresPurchaseLedger, PURCHASE_UNIQUE_CONSTRAINT};
pub use user_repository::PostgresUserRepository;

use crate::ports::StorageError;

/// Maps a sqlx error to `StorageError`, naming the failed operation.
pub(crate) fn storage_error(operation: &str, err: sqlx::Error) -> StorageError {
    StorageError::unavailable(format!("Failed to {}: {}", operation, err))
}

/// True if `err` is a violation of the named unique constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}
