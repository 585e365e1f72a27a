//! User repository port.
//!
//! Users are stored as single documents including their enrollment list.
//! `update` replaces the whole document in one write, guarded by the
//! document's version so a write based on a stale read never lands.

use async_trait::async_trait;

use crate::domain::account::{Email, User};
use crate::domain::foundation::UserId;

use super::StorageError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if the email is already registered
    async fn create(&self, user: &User) -> Result<(), StorageError>;

    /// Replaces an existing user document if it is still at `user.version`.
    ///
    /// The stored version advances by one on success. The caller's copy is
    /// not changed; reload before writing again.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user no longer exists
    /// - `Conflict` if another write landed since `user` was loaded
    async fn update(&self, user: &User) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StorageError>;

    /// All users, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
