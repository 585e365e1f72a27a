//! Enrollment handlers.
//!
//! Enrollment state lives inside the user document. Every command loads the
//! user, applies one change to the enrollment list and writes the whole user
//! back in a single versioned repository call, starting over if another
//! write got there first.
//!
//! ## Commands
//! - Enrolling in a course
//! - Recording progress and completed topics
//!
//! ## Queries
//! - Reading progress for one course or all courses

mod enroll;
mod get_progress;
mod record_progress;

pub use enroll::{EnrollCommand, EnrollHandler, EnrollResult};
pub use get_progress::{GetProgressHandler, GetProgressQuery, GetProgressResult};
pub use record_progress::{RecordProgressCommand, RecordProgressHandler, RecordProgressResult};

use crate::domain::account::User;
use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

use super::user_writes::modify_user;

async fn load_user(users: &dyn UserRepository, user_id: &UserId) -> Result<User, EnrollmentError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| EnrollmentError::user_not_found(*user_id))
}

/// Applies `change` to the user's enrollments and saves them.
async fn update_enrollments<T, F>(
    users: &dyn UserRepository,
    user_id: &UserId,
    change: F,
) -> Result<T, EnrollmentError>
where
    F: FnMut(&mut User) -> Result<T, EnrollmentError>,
{
    modify_user(users, user_id, change)
        .await?
        .map(|(_, value)| value)
        .ok_or_else(|| EnrollmentError::user_not_found(*user_id))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::account::{Email, NewUser, User};

    pub fn user() -> User {
        User::register(NewUser {
            email: Email::parse("learner@example.com").unwrap(),
            name: "Learner".to_string(),
            mobile: None,
            password_hash: "hash".to_string(),
            is_admin: false,
        })
    }
}
