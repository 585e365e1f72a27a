//! Axum router configuration for enrollment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{enroll, get_progress, record_progress, EnrollmentAppState};

/// Enrollment routes, all requiring a bearer token.
///
/// - `POST /enroll` - Enroll in a course by title
/// - `POST /progress` - Record progress and completed topics
/// - `GET /progress` - Read progress for one or all courses
pub fn enrollment_routes() -> Router<EnrollmentAppState> {
    Router::new()
        .route("/enroll", post(enroll))
        .route("/progress", get(get_progress).post(record_progress))
}
