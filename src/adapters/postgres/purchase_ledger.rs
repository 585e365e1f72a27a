//! PostgreSQL implementation of PurchaseLedger.
//!
//! Uniqueness of `(user_id, course_id)` is enforced by the
//! `purchased_courses_user_course_key` constraint. Insert uses
//! `ON CONFLICT ON CONSTRAINT ... DO NOTHING`, so a concurrent duplicate
//! delivery surfaces as zero affected rows instead of an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{PurchaseId, Timestamp, UserId};
use crate::domain::purchase::{Amount, CourseRef, PurchaseRecord, PurchaseStatus};
use crate::ports::{InsertOutcome, PurchaseLedger, StorageError};

use super::{is_unique_violation, storage_error};

/// Name of the unique constraint guarding the ledger.
pub const PURCHASE_UNIQUE_CONSTRAINT: &str = "purchased_courses_user_course_key";

pub struct PostgresPurchaseLedger {
    pool: PgPool,
}

impl PostgresPurchaseLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    user_id: Uuid,
    course_id: String,
    payment_intent_id: String,
    amount_minor: i64,
    status: String,
    purchase_date: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for PurchaseRecord {
    type Error = StorageError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::foundation::ValidationError| {
            StorageError::corrupt(format!("purchase {}: {}", row.id, e))
        };

        Ok(PurchaseRecord {
            id: PurchaseId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            course_ref: CourseRef::new(row.course_id.clone()).map_err(corrupt)?,
            payment_intent_id: row.payment_intent_id.clone(),
            amount: Amount::from_minor(row.amount_minor).map_err(corrupt)?,
            status: row.status.parse::<PurchaseStatus>().map_err(corrupt)?,
            purchase_date: Timestamp::from_datetime(row.purchase_date),
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, course_id, payment_intent_id, amount_minor, status, purchase_date \
     FROM purchased_courses";

#[async_trait]
impl PurchaseLedger for PostgresPurchaseLedger {
    async fn find(
        &self,
        user_id: &UserId,
        course_ref: &CourseRef,
    ) -> Result<Option<PurchaseRecord>, StorageError> {
        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND course_id = $2",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(course_ref.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find purchase", e))?;

        row.map(PurchaseRecord::try_from).transpose()
    }

    async fn insert(&self, record: &PurchaseRecord) -> Result<InsertOutcome, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchased_courses (
                id, user_id, course_id, payment_intent_id, amount_minor, status, purchase_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT ON CONSTRAINT purchased_courses_user_course_key DO NOTHING
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_uuid())
        .bind(record.course_ref.as_str())
        .bind(&record.payment_intent_id)
        .bind(record.amount.minor())
        .bind(record.status.as_str())
        .bind(record.purchase_date.as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(InsertOutcome::AlreadyRecorded),
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_unique_violation(&e, PURCHASE_UNIQUE_CONSTRAINT) => {
                Ok(InsertOutcome::AlreadyRecorded)
            }
            Err(e) => Err(storage_error("insert purchase", e)),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, StorageError> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY purchase_date ASC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list purchases", e))?;

        rows.into_iter().map(PurchaseRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(amount_minor: i64, status: &str) -> PurchaseRow {
        PurchaseRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: "course-1".to_string(),
            payment_intent_id: "pi_1".to_string(),
            amount_minor,
            status: status.to_string(),
            purchase_date: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_record() {
        let record = PurchaseRecord::try_from(row(1999, "completed")).unwrap();
        assert_eq!(record.amount.minor(), 1999);
        assert_eq!(record.status, PurchaseStatus::Completed);
        assert_eq!(record.course_ref.as_str(), "course-1");
    }

    #[test]
    fn unknown_status_is_corrupt() {
        let err = PurchaseRecord::try_from(row(1999, "pending")).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn non_positive_amount_is_corrupt() {
        let err = PurchaseRecord::try_from(row(0, "completed")).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
