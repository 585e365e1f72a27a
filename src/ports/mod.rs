//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `UserRepository` - User documents with embedded enrollments
//! - `PurchaseLedger` - Completed purchases, unique per (user, course)
//! - `CourseRepository` - Course catalog
//!
//! ## External Service Ports
//!
//! - `PaymentProvider` - Payment intents and webhook verification
//! - `SessionValidator` / `TokenIssuer` - Bearer token handling
//! - `PasswordHasher` - Credential hashing

mod course_repository;
mod password_hasher;
mod payment_provider;
mod purchase_ledger;
mod session_validator;
mod storage_error;
mod token_issuer;
mod user_repository;

pub use course_repository::CourseRepository;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use payment_provider::{
    CreatePaymentIntentRequest, PaymentError, PaymentErrorCode, PaymentIntent, METADATA_COURSE_ID,
    METADATA_USER_ID,
    PaymentIntentObject, PaymentProvider, WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use purchase_ledger::{InsertOutcome, PurchaseLedger};
pub use session_validator::SessionValidator;
pub use storage_error::StorageError;
pub use token_issuer::TokenIssuer;
pub use user_repository::UserRepository;
