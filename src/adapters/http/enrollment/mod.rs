//! HTTP adapter for enrollment and progress endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{EnrollmentResponse, ProgressResponse};
pub use handlers::{EnrollmentApiError, EnrollmentAppState};
pub use routes::enrollment_routes;
