use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::account::{Email, User};
use crate::domain::foundation::UserId;
use crate::ports::{StorageError, UserRepository};

/// In-memory user store.
///
/// Supports injecting a number of consecutive failures, which lets tests
/// exercise retry paths.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
    failures: RwLock<Option<(u32, StorageError)>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` operations fail with `error`.
    pub fn fail_next(&self, count: u32, error: StorageError) {
        *self.failures.write().expect("failures lock poisoned") = Some((count, error));
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.read().expect("users lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected_failure(&self) -> Result<(), StorageError> {
        let mut failures = self.failures.write().expect("failures lock poisoned");
        match failures.take() {
            Some((remaining, error)) if remaining > 0 => {
                if remaining > 1 {
                    *failures = Some((remaining - 1, error.clone()));
                }
                Err(error)
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), StorageError> {
        self.injected_failure()?;
        let mut users = self.users.write().expect("users lock poisoned");
        if users.values().any(|u| u.email == user.email) {
            return Err(StorageError::Duplicate(format!("email {}", user.email)));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        self.injected_failure()?;
        let mut users = self.users.write().expect("users lock poisoned");
        let existing = users
            .get_mut(&user.id)
            .ok_or_else(|| StorageError::NotFound(format!("user {}", user.id)))?;
        if existing.version != user.version {
            return Err(StorageError::Conflict(format!(
                "user {} is at version {}, write based on {}",
                user.id, existing.version, user.version
            )));
        }
        *existing = User {
            version: user.version + 1,
            ..user.clone()
        };
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        self.injected_failure()?;
        Ok(self.users.read().expect("users lock poisoned").get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StorageError> {
        self.injected_failure()?;
        Ok(self
            .users
            .read()
            .expect("users lock poisoned")
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        self.injected_failure()?;
        let mut users: Vec<User> = self
            .users
            .read()
            .expect("users lock poisoned")
            .values()
            .cloned()
            .collect();
        users.sort_by_key(|u| *u.created_at.as_datetime());
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::NewUser;

    fn user(email: &str) -> User {
        User::register(NewUser {
            email: Email::parse(email).unwrap(),
            name: "Test".to_string(),
            mobile: None,
            password_hash: "hash".to_string(),
            is_admin: false,
        })
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("a@x.io")).await.unwrap();

        let err = repo.create(&user("A@x.io")).await.unwrap_err();

        assert!(matches!(err, StorageError::Duplicate(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.update(&user("a@x.io")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_advances_version() {
        let repo = InMemoryUserRepository::new();
        let mut stored = user("a@x.io");
        repo.create(&stored).await.unwrap();

        stored.name = "Renamed".to_string();
        repo.update(&stored).await.unwrap();

        let reloaded = repo.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.version, 1);
        assert_eq!(reloaded.name, "Renamed");
    }

    #[tokio::test]
    async fn update_from_stale_copy_is_conflict() {
        let repo = InMemoryUserRepository::new();
        let original = user("a@x.io");
        repo.create(&original).await.unwrap();

        let mut first = original.clone();
        first.name = "First".to_string();
        repo.update(&first).await.unwrap();

        let mut second = original;
        second.name = "Second".to_string();
        let err = repo.update(&second).await.unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        let stored = repo.find_by_id(&second.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "First");
    }

    #[tokio::test]
    async fn injected_failures_run_out() {
        let repo = InMemoryUserRepository::new();
        let email = Email::parse("a@x.io").unwrap();
        repo.fail_next(2, StorageError::unavailable("down"));

        assert!(repo.find_by_email(&email).await.is_err());
        assert!(repo.find_by_email(&email).await.is_err());
        assert!(repo.find_by_email(&email).await.is_ok());
    }
}
