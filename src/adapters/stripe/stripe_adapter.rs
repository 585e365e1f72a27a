//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API:
//! payment intent creation and webhook verification.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key, webhook_secret).with_currency("usd");
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::purchase::WebhookError;
use crate::ports::{
    CreatePaymentIntentRequest, PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider,
    WebhookEvent, METADATA_COURSE_ID, METADATA_USER_ID,
};

use super::event_types::{parse_event, StripeErrorResponse, StripePaymentIntent};
use super::signature::{WebhookSignatureVerifier, DEFAULT_TOLERANCE_SECS};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// ISO currency code for created intents.
    currency: String,

    /// Maximum accepted webhook age in seconds.
    signature_tolerance_secs: i64,

    /// Reject test-mode events.
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            currency: "usd".to_string(),
            signature_tolerance_secs: DEFAULT_TOLERANCE_SECS,
            require_livemode: false,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into().to_lowercase();
        self
    }

    pub fn with_signature_tolerance_secs(mut self, secs: i64) -> Self {
        self.signature_tolerance_secs = secs;
        self
    }

    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    verifier: WebhookSignatureVerifier,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        let verifier = WebhookSignatureVerifier::new(config.webhook_secret.clone())
            .with_tolerance_secs(config.signature_tolerance_secs);
        Self {
            config,
            verifier,
            http_client: reqwest::Client::new(),
        }
    }

    /// Form parameters for `POST /v1/payment_intents`.
    fn intent_params(&self, request: &CreatePaymentIntentRequest) -> Vec<(String, String)> {
        vec![
            ("amount".to_string(), request.amount.minor().to_string()),
            ("currency".to_string(), self.config.currency.clone()),
            (
                format!("metadata[{}]", METADATA_COURSE_ID),
                request.course_ref.to_string(),
            ),
            (
                format!("metadata[{}]", METADATA_USER_ID),
                request.user_id.to_string(),
            ),
        ]
    }
}

/// Maps a non-success Stripe response to a `PaymentError`.
fn api_error(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error ({})", status));

    let code = match status.as_u16() {
        401 | 403 => PaymentErrorCode::AuthenticationError,
        400 | 402 | 404 => PaymentErrorCode::InvalidRequest,
        429 => PaymentErrorCode::RateLimitExceeded,
        _ => PaymentErrorCode::ProviderError,
    };

    let error = PaymentError::new(code, message);
    match parsed.and_then(|e| e.error.code.or(e.error.error_type)) {
        Some(provider_code) => error.with_provider_code(provider_code),
        None => error,
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let params = self.intent_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = api_error(status, &error_text);
            tracing::error!(
                status = %status,
                error = %error,
                course_id = %request.course_ref,
                "Stripe create_payment_intent failed"
            );
            return Err(error);
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::provider("Stripe response missing client_secret"))?;

        tracing::info!(
            payment_intent_id = %intent.id,
            course_id = %request.course_ref,
            user_id = %request.user_id,
            amount_minor = intent.amount,
            "Payment intent created"
        );

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
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

        let (stripe_event, event) = parse_event(payload)?;

        if self.config.require_livemode && !stripe_event.livemode {
            tracing::warn!(event_id = %event.id, "Rejected test mode event");
            return Err(WebhookError::MalformedPayload(
                "Test mode events are not accepted".to_string(),
            ));
        }

        tracing::debug!(
            event_id = %event.id,
            event_type = event.event_type.as_str(),
            "Webhook signature verified"
        );

        Ok(event)
    }
}
