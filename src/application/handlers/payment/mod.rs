//! Payment handlers.
//!
//! ## Commands
//! - Creating a payment intent for a course checkout
//! - Reconciling payment provider webhooks into the purchase ledger
//!
//! ## Queries
//! - Listing a user's purchased courses

mod create_payment_intent;
mod handle_payment_webhook;
mod list_purchased_courses;

// Commands
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};

// Queries
pub use list_purchased_courses::{
    ListPurchasedCoursesHandler, ListPurchasedCoursesQuery, ListPurchasedCoursesResult,
};
