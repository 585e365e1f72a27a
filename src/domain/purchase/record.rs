//! Purchase ledger record.

use crate::domain::foundation::{PurchaseId, Timestamp, UserId};

use super::{Amount, CourseRef, PurchaseStatus};

/// One completed payment for one course by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub course_ref: CourseRef,
    pub payment_intent_id: String,
    pub amount: Amount,
    pub status: PurchaseStatus,
    pub purchase_date: Timestamp,
}

impl PurchaseRecord {
    /// Creates a new record for a payment the provider reported as succeeded.
    pub fn completed(
        user_id: UserId,
        course_ref: CourseRef,
        payment_intent_id: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            id: PurchaseId::new(),
            user_id,
            course_ref,
            payment_intent_id: payment_intent_id.into(),
            amount,
            status: PurchaseStatus::Completed,
            purchase_date: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PurchaseRecord {
        PurchaseRecord::completed(
            UserId::new(),
            CourseRef::new("course-42").unwrap(),
            "pi_123",
            Amount::from_minor(250_000).unwrap(),
        )
    }

    #[test]
    fn completed_record_starts_completed() {
        let record = sample();
        assert_eq!(record.status, PurchaseStatus::Completed);
        assert_eq!(record.payment_intent_id, "pi_123");
        assert_eq!(record.amount.whole_major(), Some(2500));
    }

}
