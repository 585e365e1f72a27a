//! GetProgressHandler - Query handler for enrollment progress.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

use super::load_user;

#[derive(Debug, Clone)]
pub struct GetProgressQuery {
    pub user_id: UserId,
    /// When absent, every entry is returned.
    pub course_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GetProgressResult {
    Single(Enrollment),
    All(Vec<Enrollment>),
}

pub struct GetProgressHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProgressHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetProgressQuery) -> Result<GetProgressResult, EnrollmentError> {
        let user = load_user(self.users.as_ref(), &query.user_id).await?;

        match query.course_title.filter(|t| !t.is_empty()) {
            Some(title) => user
                .enrollments
                .find(&title)
                .cloned()
                .map(GetProgressResult::Single)
                .ok_or_else(|| EnrollmentError::not_enrolled(title)),
            None => Ok(GetProgressResult::All(user.enrollments.as_slice().to_vec())),
        }
    }
}
