//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{error_response, status_for};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::payment::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, ListPurchasedCoursesHandler, ListPurchasedCoursesQuery,
};
use crate::domain::purchase::{PurchaseError, WebhookError};
use crate::ports::{PaymentProvider, PurchaseLedger};

use super::dto::{
    CreatePaymentIntentRequest, CreatePaymentIntentResponse, PurchaseRecordResponse, WebhookAck,
};

/// Header carrying the provider's webhook signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PaymentAppState {
    pub ledger: Arc<dyn PurchaseLedger>,
    pub payment_provider: Arc<dyn PaymentProvider>,
}

impl PaymentAppState {
    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.ledger.clone(), self.payment_provider.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.ledger.clone(), self.payment_provider.clone())
    }

    pub fn list_purchased_courses_handler(&self) -> ListPurchasedCoursesHandler {
        ListPurchasedCoursesHandler::new(self.ledger.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payment/create-payment-intent
pub async fn create_payment_intent(
    State(state): State<PaymentAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let cmd = CreatePaymentIntentCommand {
        user_id: user.id,
        course_id: request.course_id,
        amount: request.amount,
    };

    let result = state.create_payment_intent_handler().handle(cmd).await?;

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: result.client_secret,
    }))
}

/// GET /api/payment/purchased-courses
pub async fn list_purchased_courses(
    State(state): State<PaymentAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, PaymentApiError> {
    let records = state
        .list_purchased_courses_handler()
        .handle(ListPurchasedCoursesQuery { user_id: user.id })
        .await?;

    let response: Vec<PurchaseRecordResponse> =
        records.into_iter().map(PurchaseRecordResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/payment/webhook
///
/// Takes the raw body; signature verification must see the exact bytes.
pub async fn handle_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    let result = state.webhook_handler().handle(cmd).await?;
    tracing::debug!(?result, "Webhook acknowledged");

    Ok(Json(WebhookAck { received: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts purchase errors to HTTP responses.
#[derive(Debug)]
pub struct PaymentApiError(PurchaseError);

impl From<PurchaseError> for PaymentApiError {
    fn from(err: PurchaseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        error_response(status_for(code), code, self.0.message())
    }
}

/// API error type for the webhook route. Every failure is a 400.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        if self.0.is_signature_failure() {
            tracing::warn!(error = %self.0, "Webhook rejected");
        } else {
            tracing::error!(error = %self.0, "Webhook processing failed");
        }
        error_response(self.0.status_code(), self.0.code(), self.0.to_string())
    }
}
