//! Catalog domain - courses offered on the platform.

mod course;
mod errors;

pub use course::{Course, CourseDraft, CourseModule, CoursePatch};
pub use errors::CatalogError;
