//! Axum router configuration for catalog endpoints.

use axum::{
    routing::get,
    Router,
};

use super::handlers::{create_course, get_course, list_courses, update_course, CatalogAppState};

/// Catalog routes.
///
/// - `GET /` - All courses, newest first
/// - `POST /` - Create a course (admin)
/// - `GET /:id` - One course
/// - `PUT /:id` - Partial update (admin)
pub fn catalog_routes() -> Router<CatalogAppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:id", get(get_course).put(update_course))
}
