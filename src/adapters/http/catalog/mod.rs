//! HTTP adapter for course catalog endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::CourseResponse;
pub use handlers::{CatalogApiError, CatalogAppState};
pub use routes::catalog_routes;
