//! Course catalog repository port.

use async_trait::async_trait;

use crate::domain::catalog::Course;
use crate::domain::foundation::CourseId;

use super::StorageError;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &Course) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// - `NotFound` if the course does not exist
    async fn update(&self, course: &Course) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, StorageError>;

    /// All courses, newest first.
    async fn list(&self) -> Result<Vec<Course>, StorageError>;
}
