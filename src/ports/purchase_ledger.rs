//! Purchase ledger port.
//!
//! The ledger is append-only and holds at most one record per
//! `(user, course)`. That uniqueness must be enforced by the store itself
//! so that concurrent webhook deliveries, possibly handled by different
//! processes, cannot both insert.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::purchase::{CourseRef, PurchaseRecord};

use super::StorageError;

/// Result of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was written.
    Inserted,
    /// A record for the same user and course already existed; nothing written.
    AlreadyRecorded,
}

#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Finds the record for a user and course, if any.
    async fn find(
        &self,
        user_id: &UserId,
        course_ref: &CourseRef,
    ) -> Result<Option<PurchaseRecord>, StorageError>;

    /// Inserts a record.
    ///
    /// A uniqueness violation on `(user, course)` is reported as
    /// `Ok(InsertOutcome::AlreadyRecorded)`, never as an error.
    async fn insert(&self, record: &PurchaseRecord) -> Result<InsertOutcome, StorageError>;

    /// All records of a user, oldest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, StorageError>;
}
