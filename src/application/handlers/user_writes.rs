//! Versioned read-modify-write of user documents.
//!
//! A user is loaded, changed in memory and written back only if nobody else
//! wrote it in between. When the write loses that race the whole cycle runs
//! again against the fresh document, so concurrent changes to one user are
//! all kept.

use crate::domain::account::User;
use crate::domain::foundation::UserId;
use crate::ports::{StorageError, UserRepository};

/// Load-change-write cycles tried before giving up on a busy user.
pub(crate) const MAX_WRITE_ATTEMPTS: u32 = 5;

/// Applies `mutate` to the stored user and saves the result.
///
/// `mutate` may run more than once and must derive its change from the user
/// it is given. An error from `mutate` aborts without writing.
///
/// Returns `None` if the user does not exist, otherwise the saved user and
/// the value produced by the successful `mutate` call.
pub(crate) async fn modify_user<T, E, F>(
    users: &dyn UserRepository,
    user_id: &UserId,
    mut mutate: F,
) -> Result<Option<(User, T)>, E>
where
    F: FnMut(&mut User) -> Result<T, E>,
    E: From<StorageError>,
{
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let Some(mut user) = users.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let value = mutate(&mut user)?;
        user.touch();

        match users.update(&user).await {
            Ok(()) => {
                user.version += 1;
                return Ok(Some((user, value)));
            }
            Err(StorageError::Conflict(reason)) => {
                tracing::debug!(user_id = %user_id, attempt, %reason, "User changed during write, retrying");
            }
            Err(StorageError::NotFound(_)) => return Ok(None),
            Err(other) => return Err(other.into()),
        }
    }

    tracing::warn!(user_id = %user_id, attempts = MAX_WRITE_ATTEMPTS, "User write kept conflicting");
    Err(StorageError::Conflict(format!("user {} kept changing", user_id)).into())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::account::{Email, User};
    use crate::domain::foundation::UserId;
    use crate::ports::{StorageError, UserRepository};

    /// Store that hands control back to the scheduler after every read, so
    /// two tasks joined on one thread interleave between read and write.
    pub struct InterleavingUserRepository {
        inner: Arc<InMemoryUserRepository>,
    }

    impl InterleavingUserRepository {
        pub fn new(inner: Arc<InMemoryUserRepository>) -> Self {
            Self { inner }
        }
    }

    #[async_trait]
    impl UserRepository for InterleavingUserRepository {
        async fn create(&self, user: &User) -> Result<(), StorageError> {
            self.inner.create(user).await
        }

        async fn update(&self, user: &User) -> Result<(), StorageError> {
            self.inner.update(user).await
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError> {
            let found = self.inner.find_by_id(id).await;
            tokio::task::yield_now().await;
            found
        }

        async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StorageError> {
            self.inner.find_by_email(email).await
        }

        async fn list_all(&self) -> Result<Vec<User>, StorageError> {
            self.inner.list_all().await
        }
    }
}
