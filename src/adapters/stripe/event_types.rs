//! Stripe wire types and their mapping to port types.
//!
//! These types mirror Stripe JSON as it arrives in webhook payloads and API
//! responses. Only the fields this service reads are declared.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::purchase::WebhookError;
use crate::ports::{PaymentIntentObject, WebhookEvent, WebhookEventData, WebhookEventType};

/// Stripe event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,

    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

/// Payment intent object, as returned by the API and embedded in events.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Intent ID (pi_...).
    pub id: String,

    /// Amount in minor units.
    pub amount: i64,

    pub currency: String,

    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Only present in API responses to the creating account.
    pub client_secret: Option<String>,

    pub status: Option<String>,
}

/// Stripe API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl From<StripePaymentIntent> for PaymentIntentObject {
    fn from(intent: StripePaymentIntent) -> Self {
        Self {
            id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
            metadata: intent.metadata,
        }
    }
}

/// Parses a verified event body into the provider-neutral event.
///
/// `payment_intent.*` events must carry a well-formed payment intent object;
/// other event types are not inspected.
pub fn parse_event(payload: &[u8]) -> Result<(StripeWebhookEvent, WebhookEvent), WebhookError> {
    let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        WebhookError::MalformedPayload(format!("Invalid event JSON: {}", e))
    })?;

    let event_type = WebhookEventType::from_provider(&stripe_event.event_type);

    let data = if stripe_event.event_type.starts_with("payment_intent.") {
        let intent: StripePaymentIntent = serde_json::from_value(stripe_event.data.object.clone())
            .map_err(|e| WebhookError::MalformedPayload(format!("Invalid payment intent: {}", e)))?;
        WebhookEventData::PaymentIntent(intent.into())
    } else {
        WebhookEventData::Other
    };

    let event = WebhookEvent {
        id: stripe_event.id.clone(),
        event_type,
        data,
        created_at: stripe_event.created,
    };

    Ok((stripe_event, event))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCEEDED: &str = r#"{
        "id": "evt_1",
        "object": "event",
        "type": "payment_intent.succeeded",
        "created": 1704067200,
        "livemode": false,
        "api_version": "2023-10-16",
        "data": {
            "object": {
                "id": "pi_123",
                "object": "payment_intent",
                "amount": 250000,
                "currency": "usd",
                "status": "succeeded",
                "metadata": {"courseId": "course-42", "userId": "550e8400-e29b-41d4-a716-446655440000"}
            }
        }
    }"#;

    #[test]
    fn parses_payment_intent_succeeded() {
        let (raw, event) = parse_event(SUCCEEDED.as_bytes()).unwrap();

        assert_eq!(raw.api_version.as_deref(), Some("2023-10-16"));
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, WebhookEventType::PaymentIntentSucceeded);
        match event.data {
            WebhookEventData::PaymentIntent(intent) => {
                assert_eq!(intent.id, "pi_123");
                assert_eq!(intent.amount, 250_000);
                assert_eq!(intent.course_id(), Some("course-42"));
            }
            other => panic!("Expected payment intent data, got {:?}", other),
        }
    }

    #[test]
    fn unrelated_event_is_not_inspected() {
        let payload = r#"{"id":"evt_2","type":"customer.created","created":1,"data":{"object":{"weird":true}}}"#;

        let (_, event) = parse_event(payload.as_bytes()).unwrap();

        assert_eq!(
            event.event_type,
            WebhookEventType::Unknown("customer.created".to_string())
        );
        assert_eq!(event.data, WebhookEventData::Other);
    }

    #[test]
    fn payment_intent_without_amount_is_malformed() {
        let payload = r#"{"id":"evt_3","type":"payment_intent.succeeded","created":1,"data":{"object":{"id":"pi_1","currency":"usd"}}}"#;

        let result = parse_event(payload.as_bytes());

        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            parse_event(b"not json"),
            Err(WebhookError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_metadata_defaults_to_empty() {
        let payload = r#"{"id":"evt_4","type":"payment_intent.succeeded","created":1,"data":{"object":{"id":"pi_1","amount":100,"currency":"usd"}}}"#;

        let (_, event) = parse_event(payload.as_bytes()).unwrap();

        match event.data {
            WebhookEventData::PaymentIntent(intent) => assert!(intent.metadata.is_empty()),
            other => panic!("Expected payment intent data, got {:?}", other),
        }
    }
}
