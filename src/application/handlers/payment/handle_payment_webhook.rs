//! HandlePaymentWebhookHandler - Command handler for payment provider webhooks.
//!
//! Turns a verified `payment_intent.succeeded` event into exactly one ledger
//! row per (user, course). Deliveries are at-least-once and may arrive in any
//! order or concurrently, so every path is idempotent:
//!
//! 1. The ledger is checked for an existing row.
//! 2. The insert is guarded by the ledger's uniqueness constraint; a lost
//!    race comes back as `AlreadyRecorded`.
//!
//! Failures that might succeed on redelivery are returned as errors so the
//! provider retries. Events that can never succeed are acknowledged.

use std::sync::Arc;

use crate::domain::foundation::{PurchaseId, UserId};
use crate::domain::purchase::{Amount, CourseRef, PurchaseRecord, WebhookError};
use crate::ports::{
    InsertOutcome, PaymentIntentObject, PaymentProvider, PurchaseLedger, WebhookEvent,
    WebhookEventData, WebhookEventType,
};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw, unparsed request body.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing. Every variant is acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlePaymentWebhookResult {
    /// A new purchase was recorded.
    PurchaseRecorded {
        purchase_id: PurchaseId,
        user_id: UserId,
        course_ref: CourseRef,
    },
    /// The purchase was already in the ledger.
    AlreadyRecorded,
    /// Succeeded event without usable correlation metadata.
    MissingMetadata,
    /// Succeeded event whose amount is not positive.
    InvalidAmount,
    /// Event type that needs no action.
    Ignored,
}

/// Handler for processing payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    ledger: Arc<dyn PurchaseLedger>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(ledger: Arc<dyn PurchaseLedger>, payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self {
            ledger,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Verify signature over the raw bytes and parse the event
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, cmd.signature.as_deref())
            .await?;

        tracing::debug!(event_id = %event.id, event_type = event.event_type.as_str(), "Webhook verified");

        // 2. Dispatch on event type
        match &event.event_type {
            WebhookEventType::PaymentIntentSucceeded => self.handle_succeeded(&event).await,
            WebhookEventType::PaymentIntentFailed => {
                tracing::info!(event_id = %event.id, "Payment failed, nothing to record");
                Ok(HandlePaymentWebhookResult::Ignored)
            }
            WebhookEventType::Unknown(_) => Ok(HandlePaymentWebhookResult::Ignored),
        }
    }

    async fn handle_succeeded(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        let intent = match &event.data {
            WebhookEventData::PaymentIntent(intent) => intent,
            WebhookEventData::Other => {
                return Err(WebhookError::MalformedPayload(
                    "payment_intent.succeeded without a payment intent object".to_string(),
                ))
            }
        };

        let Some((user_id, course_ref)) = correlation(intent) else {
            tracing::warn!(
                event_id = %event.id,
                payment_intent_id = %intent.id,
                "Succeeded payment intent is missing courseId/userId metadata, acknowledging without record"
            );
            return Ok(HandlePaymentWebhookResult::MissingMetadata);
        };

        // Fast path for redeliveries
        if self.ledger.find(&user_id, &course_ref).await?.is_some() {
            tracing::info!(
                event_id = %event.id,
                user_id = %user_id,
                course_id = %course_ref,
                "Purchase already recorded"
            );
            return Ok(HandlePaymentWebhookResult::AlreadyRecorded);
        }

        let Ok(amount) = Amount::from_minor(intent.amount) else {
            tracing::warn!(
                event_id = %event.id,
                payment_intent_id = %intent.id,
                amount = intent.amount,
                "Succeeded payment intent has a non-positive amount, acknowledging without record"
            );
            return Ok(HandlePaymentWebhookResult::InvalidAmount);
        };
        let record = PurchaseRecord::completed(user_id, course_ref.clone(), intent.id.clone(), amount);

        match self.ledger.insert(&record).await? {
            InsertOutcome::Inserted => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    course_id = %course_ref,
                    payment_intent_id = %intent.id,
                    amount = %amount,
                    "Purchase recorded"
                );
                Ok(HandlePaymentWebhookResult::PurchaseRecorded {
                    purchase_id: record.id,
                    user_id,
                    course_ref,
                })
            }
            InsertOutcome::AlreadyRecorded => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    course_id = %course_ref,
                    "Concurrent delivery already recorded the purchase"
                );
                Ok(HandlePaymentWebhookResult::AlreadyRecorded)
            }
        }
    }
}

/// Extracts (user, course) from intent metadata. A user id that is not a
/// valid UUID can never match a user and is treated as missing.
fn correlation(intent: &PaymentIntentObject) -> Option<(UserId, CourseRef)> {
    let course_ref = CourseRef::new(intent.course_id()?).ok()?;
    let user_id = intent.user_id()?.parse::<UserId>().ok()?;
    Some((user_id, course_ref))
}
