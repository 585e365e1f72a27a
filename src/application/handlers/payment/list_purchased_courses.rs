//! ListPurchasedCoursesHandler - Query handler for a user's purchase history.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::purchase::{PurchaseError, PurchaseRecord};
use crate::ports::PurchaseLedger;

#[derive(Debug, Clone)]
pub struct ListPurchasedCoursesQuery {
    pub user_id: UserId,
}

pub type ListPurchasedCoursesResult = Vec<PurchaseRecord>;

pub struct ListPurchasedCoursesHandler {
    ledger: Arc<dyn PurchaseLedger>,
}

impl ListPurchasedCoursesHandler {
    pub fn new(ledger: Arc<dyn PurchaseLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        query: ListPurchasedCoursesQuery,
    ) -> Result<ListPurchasedCoursesResult, PurchaseError> {
        Ok(self.ledger.list_for_user(&query.user_id).await?)
    }
}
