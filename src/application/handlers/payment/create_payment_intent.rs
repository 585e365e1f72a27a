//! CreatePaymentIntentHandler - Command handler for starting a course checkout.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::purchase::{Amount, CourseRef, PurchaseError};
use crate::ports::{CreatePaymentIntentRequest, PaymentProvider, PurchaseLedger};

/// Command to create a payment intent for one course.
///
/// Fields arrive as the client sent them; the handler validates them.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub user_id: UserId,
    pub course_id: Option<String>,
    /// Price in major currency units.
    pub amount: Option<f64>,
}

/// Result of successful intent creation.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentResult {
    pub payment_intent_id: String,
    pub client_secret: String,
}

/// Handler for creating payment intents.
///
/// Refuses to create an intent for a course the user already owns. The
/// check is advisory: the webhook path still guards the ledger on its own.
pub struct CreatePaymentIntentHandler {
    ledger: Arc<dyn PurchaseLedger>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreatePaymentIntentHandler {
    pub fn new(ledger: Arc<dyn PurchaseLedger>, payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self {
            ledger,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, PurchaseError> {
        // 1. Validate input
        let course_ref = CourseRef::new(cmd.course_id.unwrap_or_default())?;
        let amount = match cmd.amount {
            Some(major) => Amount::from_major(major)?,
            None => return Err(PurchaseError::validation("amount", "Field is required")),
        };

        // 2. Refuse a second purchase of the same course
        if self.ledger.find(&cmd.user_id, &course_ref).await?.is_some() {
            tracing::info!(
                user_id = %cmd.user_id,
                course_id = %course_ref,
                "Payment intent refused, course already purchased"
            );
            return Err(PurchaseError::already_purchased(course_ref));
        }

        // 3. Create the intent with correlation metadata
        let request = CreatePaymentIntentRequest {
            course_ref: course_ref.clone(),
            user_id: cmd.user_id,
            amount,
        };
        let intent = self
            .payment_provider
            .create_payment_intent(request)
            .await
            .map_err(|e| PurchaseError::payment_provider(e.to_string()))?;

        tracing::info!(
            user_id = %cmd.user_id,
            course_id = %course_ref,
            payment_intent_id = %intent.id,
            amount_minor = amount.minor(),
            "Payment intent created"
        );

        Ok(CreatePaymentIntentResult {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
