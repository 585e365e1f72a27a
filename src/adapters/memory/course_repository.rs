use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::catalog::Course;
use crate::domain::foundation::CourseId;
use crate::ports::{CourseRepository, StorageError};

/// In-memory course catalog.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<HashMap<CourseId, Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), StorageError> {
        self.courses
            .write()
            .expect("courses lock poisoned")
            .insert(course.id, course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), StorageError> {
        let mut courses = self.courses.write().expect("courses lock poisoned");
        match courses.get_mut(&course.id) {
            Some(existing) => {
                *existing = course.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(format!("course {}", course.id))),
        }
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, StorageError> {
        Ok(self.courses.read().expect("courses lock poisoned").get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Course>, StorageError> {
        let mut courses: Vec<Course> = self
            .courses
            .read()
            .expect("courses lock poisoned")
            .values()
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.as_datetime().cmp(a.created_at.as_datetime()));
        Ok(courses)
    }
}
