//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe, including:
//! - Payment intent creation
//! - Webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated against a replay window (5 minutes by default)
//! - All secrets are handled via `secrecy::SecretString`

mod event_types;
mod mock_payment_provider;
mod signature;
mod stripe_adapter;

pub use event_types::{parse_event, StripePaymentIntent, StripeWebhookEvent};
pub use mock_payment_provider::MockPaymentProvider;
pub use signature::{signature_header, SignatureHeader, WebhookSignatureVerifier};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
