//! Request and response types for payment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::purchase::{PurchaseRecord, PurchaseStatus};

/// Body of `POST /api/payment/create-payment-intent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub course_id: Option<String>,
    /// Major currency units.
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Webhook acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Ledger record as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecordResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub payment_intent_id: String,
    /// Major units; whole amounts serialize as integers.
    pub amount: serde_json::Number,
    pub status: PurchaseStatus,
    pub purchase_date: DateTime<Utc>,
}

impl From<PurchaseRecord> for PurchaseRecordResponse {
    fn from(record: PurchaseRecord) -> Self {
        let amount = match record.amount.whole_major() {
            Some(whole) => serde_json::Number::from(whole),
            None => serde_json::Number::from_f64(record.amount.major())
                .unwrap_or_else(|| serde_json::Number::from(0)),
        };

        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            course_id: record.course_ref.to_string(),
            payment_intent_id: record.payment_intent_id,
            amount,
            status: record.status,
            purchase_date: *record.purchase_date.as_datetime(),
        }
    }
}
