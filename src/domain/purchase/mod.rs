//! Purchase domain - the ledger of completed course payments.
//!
//! A `PurchaseRecord` is commercial proof that a user paid for a catalog
//! course. It is keyed by `(UserId, CourseRef)` and at most one exists per
//! pair. Records are only created from a verified `payment_intent.succeeded`
//! webhook.
//!
//! Purchases are deliberately independent from enrollments: a user's
//! enrollment entry tracks learning progress, keyed by title, while the
//! ledger tracks payment, keyed by the external catalog id. Nothing joins
//! them transactionally.

mod amount;
mod course_ref;
mod errors;
mod record;
mod status;
mod webhook_errors;

pub use amount::Amount;
pub use course_ref::CourseRef;
pub use errors::PurchaseError;
pub use record::PurchaseRecord;
pub use status::PurchaseStatus;
pub use webhook_errors::WebhookError;
