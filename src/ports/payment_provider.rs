//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway integration (Stripe).
//! The provider owns the payment intent lifecycle; this service only creates
//! intents and consumes their signed webhook notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::UserId;
use crate::domain::purchase::{Amount, CourseRef, WebhookError};

/// Metadata key carrying the catalog course reference.
pub const METADATA_COURSE_ID: &str = "courseId";

/// Metadata key carrying the purchasing user's id.
pub const METADATA_USER_ID: &str = "userId";

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for a single course purchase.
    ///
    /// The course and user are attached as intent metadata under
    /// [`METADATA_COURSE_ID`] and [`METADATA_USER_ID`].
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Verify a webhook signature over the raw body and parse the event.
    ///
    /// `signature` is the raw signature header value, if one was sent.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError>;
}

/// Request to create a payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentIntentRequest {
    pub course_ref: CourseRef,
    pub user_id: UserId,
    pub amount: Amount,
}

impl CreatePaymentIntentRequest {
    /// Metadata to attach to the intent.
    pub fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            (METADATA_COURSE_ID.to_string(), self.course_ref.to_string()),
            (METADATA_USER_ID.to_string(), self.user_id.to_string()),
        ])
    }
}

/// Payment intent as created by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's intent ID.
    pub id: String,

    /// Secret the client uses to confirm the payment.
    pub client_secret: String,
}

/// Webhook event from payment provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    /// Event ID from provider.
    pub id: String,

    pub event_type: WebhookEventType,

    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Types of webhook events we distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    PaymentIntentSucceeded,
    PaymentIntentFailed,
    /// Any other event type, acknowledged without side effects.
    Unknown(String),
}

impl WebhookEventType {
    /// Maps the provider's event type string.
    pub fn from_provider(event_type: &str) -> Self {
        match event_type {
            "payment_intent.succeeded" => WebhookEventType::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentIntentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::PaymentIntentSucceeded => "payment_intent.succeeded",
            WebhookEventType::PaymentIntentFailed => "payment_intent.payment_failed",
            WebhookEventType::Unknown(other) => other,
        }
    }
}

/// Webhook event payload.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEventData {
    PaymentIntent(PaymentIntentObject),
    /// Payload of an event type we do not inspect.
    Other,
}

/// Payment intent object carried by `payment_intent.*` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentObject {
    pub id: String,
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
    pub metadata: HashMap<String, String>,
}

impl PaymentIntentObject {
    pub fn course_id(&self) -> Option<&str> {
        self.metadata_value(METADATA_COURSE_ID)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.metadata_value(METADATA_USER_ID)
    }

    fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    pub code: PaymentErrorCode,

    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    NetworkError,
    AuthenticationError,
    InvalidRequest,
    RateLimitExceeded,
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
