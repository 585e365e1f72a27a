//! EnrollHandler - Command handler for enrolling a user in a course.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

use super::update_enrollments;

#[derive(Debug, Clone)]
pub struct EnrollCommand {
    pub user_id: UserId,
    pub course_title: Option<String>,
}

/// The newly created entry.
pub type EnrollResult = Enrollment;

pub struct EnrollHandler {
    users: Arc<dyn UserRepository>,
}

impl EnrollHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: EnrollCommand) -> Result<EnrollResult, EnrollmentError> {
        let title = cmd.course_title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(EnrollmentError::validation("courseTitle", "cannot be empty"));
        }

        let entry = update_enrollments(self.users.as_ref(), &cmd.user_id, |user| {
            Ok(user.enrollments.enroll(&title)?.clone())
        })
        .await?;

        tracing::info!(user_id = %cmd.user_id, course_title = %title, "User enrolled");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::handlers::enrollment::test_support;
    use crate::application::handlers::user_writes::test_support::InterleavingUserRepository;
    use crate::domain::foundation::Progress;
    use crate::ports::StorageError;

    async fn setup() -> (Arc<InMemoryUserRepository>, EnrollHandler, UserId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = test_support::user();
        let user_id = user.id;
        users.create(&user).await.unwrap();
        (users.clone(), EnrollHandler::new(users), user_id)
    }

    fn enroll(user_id: UserId, title: &str) -> EnrollCommand {
        EnrollCommand {
            user_id,
            course_title: Some(title.to_string()),
        }
    }

    #[tokio::test]
    async fn enroll_appends_zeroed_entry_and_persists() {
        let (users, handler, user_id) = setup().await;

        let entry = handler.handle(enroll(user_id, "Course A")).await.unwrap();

        assert_eq!(entry.title, "Course A");
        assert_eq!(entry.progress, Progress::ZERO);
        assert!(entry.completed_topics.is_empty());

        let stored = users.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.enrollments.len(), 1);
        assert_eq!(stored.enrollments.find("Course A"), Some(&entry));
    }

    #[tokio::test]
    async fn enrolling_twice_is_already_enrolled_and_list_unchanged() {
        let (users, handler, user_id) = setup().await;
        handler.handle(enroll(user_id, "Course A")).await.unwrap();

        let err = handler.handle(enroll(user_id, "Course A")).await.unwrap_err();

        assert!(matches!(err, EnrollmentError::AlreadyEnrolled(_)));
        let stored = users.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.enrollments.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_enrollments_for_one_user_are_all_kept() {
        let (users, _, user_id) = setup().await;
        let handler = EnrollHandler::new(Arc::new(InterleavingUserRepository::new(users.clone())));

        let (a, b) = tokio::join!(
            handler.handle(enroll(user_id, "Course A")),
            handler.handle(enroll(user_id, "Course B")),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        let stored = users.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.enrollments.len(), 2);
        assert!(stored.enrollments.find("Course A").is_some());
        assert!(stored.enrollments.find("Course B").is_some());
    }

    #[tokio::test]
    async fn concurrent_duplicate_enrollment_admits_one() {
        let (users, _, user_id) = setup().await;
        let handler = EnrollHandler::new(Arc::new(InterleavingUserRepository::new(users.clone())));

        let (a, b) = tokio::join!(
            handler.handle(enroll(user_id, "Course A")),
            handler.handle(enroll(user_id, "Course A")),
        );

        let already = [a, b]
            .iter()
            .filter(|r| matches!(r, Err(EnrollmentError::AlreadyEnrolled(_))))
            .count();
        assert_eq!(already, 1);
        let stored = users.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.enrollments.len(), 1);
    }

    #[tokio::test]
    async fn empty_title_is_validation_error() {
        let (_, handler, user_id) = setup().await;

        for cmd in [
            enroll(user_id, "  "),
            EnrollCommand {
                user_id,
                course_title: None,
            },
        ] {
            let err = handler.handle(cmd).await.unwrap_err();
            assert!(matches!(err, EnrollmentError::ValidationFailed { .. }));
        }
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (_, handler, _) = setup().await;
        let err = handler.handle(enroll(UserId::new(), "Course A")).await.unwrap_err();
        assert!(matches!(err, EnrollmentError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let (users, handler, user_id) = setup().await;
        users.fail_next(1, StorageError::unavailable("down"));

        let err = handler.handle(enroll(user_id, "Course A")).await.unwrap_err();

        assert!(matches!(err, EnrollmentError::Infrastructure(_)));
    }
}
