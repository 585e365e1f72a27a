//! UpdateCourseHandler - Command handler for partial course updates.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course, CoursePatch};
use crate::domain::foundation::CourseId;
use crate::ports::{CourseRepository, StorageError};

#[derive(Debug, Clone)]
pub struct UpdateCourseCommand {
    pub course_id: CourseId,
    pub patch: CoursePatch,
}

pub struct UpdateCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl UpdateCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: UpdateCourseCommand) -> Result<Course, CatalogError> {
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(cmd.course_id))?;

        course.apply(cmd.patch)?;
        self.courses.update(&course).await.map_err(|e| match e {
            StorageError::NotFound(_) => CatalogError::not_found(cmd.course_id),
            other => other.into(),
        })?;

        tracing::info!(course_id = %course.id, "Course updated");
        Ok(course)
    }
}
