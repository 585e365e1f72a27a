//! Mock payment provider for testing and local development.
//!
//! Records every intent request, can be told to fail, and verifies webhooks
//! with the real signature scheme so tests exercise the same bytes-in path
//! as production.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::purchase::WebhookError;
use crate::ports::{CreatePaymentIntentRequest, PaymentError, PaymentIntent, PaymentProvider, WebhookEvent};

use super::event_types::parse_event;
use super::signature::WebhookSignatureVerifier;

/// Mock payment provider.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new("whsec_test");
/// mock.fail_next(PaymentError::network("down"));
/// let intents = mock.created_intents();
/// ```
#[derive(Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
    verifier: WebhookSignatureVerifier,
}

#[derive(Default)]
struct MockState {
    created: Vec<CreatePaymentIntentRequest>,
    next_error: Option<PaymentError>,
}

impl MockPaymentProvider {
    /// Creates a mock that verifies webhooks signed with `webhook_secret`.
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            verifier: WebhookSignatureVerifier::new(SecretString::new(webhook_secret.into())),
        }
    }

    /// Makes the next `create_payment_intent` call fail with `error`.
    pub fn fail_next(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Every request passed to `create_payment_intent` that succeeded.
    pub fn created_intents(&self) -> Vec<CreatePaymentIntentRequest> {
        self.state().created.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut state = self.state();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let n = state.created.len() + 1;
        state.created.push(request);
        Ok(PaymentIntent {
            id: format!("pi_mock_{}", n),
            client_secret: format!("pi_mock_{}_secret_{}", n, n),
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or(WebhookError::MissingSignature)?;
        self.verifier.verify(payload, signature)?;
        let (_, event) = parse_event(payload)?;
        Ok(event)
    }
}
