//! GetCourseHandler - Query handler for one catalog course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course};
use crate::domain::foundation::CourseId;
use crate::ports::CourseRepository;

#[derive(Debug, Clone)]
pub struct GetCourseQuery {
    pub course_id: CourseId,
}

pub struct GetCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl GetCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, query: GetCourseQuery) -> Result<Course, CatalogError> {
        self.courses
            .find_by_id(&query.course_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(query.course_id))
    }
}
