//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the academy domain.

mod auth;
mod errors;
mod ids;
mod progress;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{ErrorCode, ValidationError};
pub use ids::{CourseId, EnrollmentId, PurchaseId, UserId};
pub use progress::Progress;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
