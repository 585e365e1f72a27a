//! GetCurrentUserHandler - Query handler for the caller's own profile.

use std::sync::Arc;

use crate::domain::account::{AccountError, User};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub user_id: UserId,
}

pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<User, AccountError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| AccountError::user_not_found(query.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::account::{Email, NewUser};

    #[tokio::test]
    async fn returns_stored_user() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::register(NewUser {
            email: Email::parse("me@example.com").unwrap(),
            name: "Me".to_string(),
            mobile: Some("555".to_string()),
            password_hash: "h".to_string(),
            is_admin: false,
        });
        users.create(&user).await.unwrap();

        let found = GetCurrentUserHandler::new(users)
            .handle(GetCurrentUserQuery { user_id: user.id })
            .await
            .unwrap();

        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn vanished_user_is_not_found() {
        let err = GetCurrentUserHandler::new(Arc::new(InMemoryUserRepository::new()))
            .handle(GetCurrentUserQuery { user_id: UserId::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::UserNotFound(_)));
    }
}
