//! Catalog handlers.
//!
//! ## Commands
//! - Creating a course (admin)
//! - Updating a course (admin)
//!
//! ## Queries
//! - Listing courses
//! - Getting one course

mod create_course;
mod get_course;
mod list_courses;
mod update_course;

pub use create_course::{CreateCourseCommand, CreateCourseHandler};
pub use get_course::{GetCourseHandler, GetCourseQuery};
pub use list_courses::{ListCoursesHandler, ListCoursesQuery};
pub use update_course::{UpdateCourseCommand, UpdateCourseHandler};
