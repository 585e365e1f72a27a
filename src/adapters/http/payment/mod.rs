//! HTTP adapter for payment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreatePaymentIntentRequest, CreatePaymentIntentResponse, PurchaseRecordResponse, WebhookAck};
pub use handlers::{PaymentApiError, PaymentAppState, WebhookApiError, SIGNATURE_HEADER};
pub use routes::{payment_routes, webhook_routes};
