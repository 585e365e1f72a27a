use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::purchase::{CourseRef, PurchaseRecord};
use crate::ports::{InsertOutcome, PurchaseLedger, StorageError};

/// In-memory purchase ledger.
///
/// The uniqueness check and the append happen under one write lock, which
/// gives the same guarantee as the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryPurchaseLedger {
    records: RwLock<Vec<PurchaseRecord>>,
    force_error: RwLock<Option<StorageError>>,
}

impl InMemoryPurchaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces every operation to fail with `error` until cleared.
    pub fn set_error(&self, error: StorageError) {
        *self.force_error.write().expect("error lock poisoned") = Some(error);
    }

    pub fn clear_error(&self) {
        *self.force_error.write().expect("error lock poisoned") = None;
    }

    /// All records, in insertion order.
    pub fn records(&self) -> Vec<PurchaseRecord> {
        self.records.read().expect("ledger lock poisoned").clone()
    }

    fn check_error(&self) -> Result<(), StorageError> {
        match self.force_error.read().expect("error lock poisoned").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PurchaseLedger for InMemoryPurchaseLedger {
    async fn find(
        &self,
        user_id: &UserId,
        course_ref: &CourseRef,
    ) -> Result<Option<PurchaseRecord>, StorageError> {
        self.check_error()?;
        Ok(self
            .records
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .find(|r| &r.user_id == user_id && &r.course_ref == course_ref)
            .cloned())
    }

    async fn insert(&self, record: &PurchaseRecord) -> Result<InsertOutcome, StorageError> {
        self.check_error()?;
        let mut records = self.records.write().expect("ledger lock poisoned");
        if records
            .iter()
            .any(|r| r.user_id == record.user_id && r.course_ref == record.course_ref)
        {
            return Ok(InsertOutcome::AlreadyRecorded);
        }
        records.push(record.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, StorageError> {
        self.check_error()?;
        Ok(self
            .records
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }
}
