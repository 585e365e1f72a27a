//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_payment_intent, handle_webhook, list_purchased_courses, PaymentAppState,
};

/// Payment routes that require a bearer token.
///
/// - `POST /create-payment-intent` - Start a checkout
/// - `GET /purchased-courses` - Caller's purchase history
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/purchased-courses", get(list_purchased_courses))
}

/// Webhook route, mounted outside the auth layer. Authenticity comes from
/// the signature, not a bearer token.
///
/// - `POST /webhook` - Provider event delivery
pub fn webhook_routes() -> Router<PaymentAppState> {
    Router::new().route("/webhook", post(handle_webhook))
}
