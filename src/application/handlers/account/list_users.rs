//! ListUsersHandler - Admin query listing users with a progress summary.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery;

/// One row of the admin user listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub is_admin: bool,
    /// Rounded mean of per-course progress.
    pub progress: u8,
}

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, _query: ListUsersQuery) -> Result<Vec<UserSummary>, AccountError> {
        let users = self.users.list_all().await?;
        Ok(users
            .into_iter()
            .map(|user| UserSummary {
                progress: user.enrollments.average_progress(),
                name: user.name,
                email: user.email.to_string(),
                mobile: user.mobile,
                is_admin: user.is_admin,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::account::{Email, NewUser, User};
    use crate::domain::enrollment::ProgressUpdate;
    use crate::domain::foundation::Progress;

    fn user(email: &str) -> User {
        User::register(NewUser {
            email: Email::parse(email).unwrap(),
            name: email.to_string(),
            mobile: None,
            password_hash: "h".to_string(),
            is_admin: false,
        })
    }

    #[tokio::test]
    async fn progress_is_rounded_mean_of_entries() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut learner = user("learner@example.com");
        for (title, value) in [("A", 40), ("B", 75)] {
            learner.enrollments.enroll(title).unwrap();
            learner
                .enrollments
                .record_progress(
                    title,
                    ProgressUpdate {
                        progress: Some(Progress::try_new(value).unwrap()),
                        completed_topic: None,
                    },
                )
                .unwrap();
        }
        users.create(&learner).await.unwrap();
        users.create(&user("idle@example.com")).await.unwrap();

        let summaries = ListUsersHandler::new(users).handle(ListUsersQuery).await.unwrap();

        let by_email = |e: &str| summaries.iter().find(|s| s.email == e).unwrap().progress;
        assert_eq!(by_email("learner@example.com"), 58);
        assert_eq!(by_email("idle@example.com"), 0);
    }
}
