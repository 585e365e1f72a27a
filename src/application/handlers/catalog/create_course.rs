//! CreateCourseHandler - Command handler for adding a catalog course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course, CourseDraft};
use crate::ports::CourseRepository;

#[derive(Debug, Clone)]
pub struct CreateCourseCommand {
    pub draft: CourseDraft,
}

pub struct CreateCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl CreateCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: CreateCourseCommand) -> Result<Course, CatalogError> {
        let course = Course::create(cmd.draft)?;
        self.courses.create(&course).await?;
        tracing::info!(course_id = %course.id, title = %course.title, "Course created");
        Ok(course)
    }
}
