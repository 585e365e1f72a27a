//! ListCoursesHandler - Query handler for the course catalog.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course};
use crate::ports::CourseRepository;

#[derive(Debug, Clone, Default)]
pub struct ListCoursesQuery;

pub struct ListCoursesHandler {
    courses: Arc<dyn CourseRepository>,
}

impl ListCoursesHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// All courses, newest first.
    pub async fn handle(&self, _query: ListCoursesQuery) -> Result<Vec<Course>, CatalogError> {
        Ok(self.courses.list().await?)
    }
}
