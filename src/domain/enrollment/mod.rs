//! Enrollment domain - per-user course progress.
//!
//! Enrollments live inside the user document and are always written back
//! together with it. Entries are matched by exact course title; two catalog
//! courses sharing a title are indistinguishable here.

mod enrollments;
mod errors;

pub use enrollments::{Enrollment, Enrollments, ProgressUpdate};
pub use errors::EnrollmentError;
