//! RegisterHandler - Command handler for password account registration.

use std::sync::Arc;

use crate::domain::account::{AccountError, Email, NewUser, User, MIN_PASSWORD_LEN};
use crate::ports::{PasswordHasher, StorageError, TokenIssuer, UserRepository};

use super::{issue_session, AdminEmails, AuthSession};

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub name: String,
    pub mobile: Option<String>,
}

pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    admin_emails: AdminEmails,
}

impl RegisterHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        admin_emails: AdminEmails,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            admin_emails,
        }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<AuthSession, AccountError> {
        // 1. Validate input
        let email = Email::parse(&cmd.email)?;
        let name = cmd.name.trim().to_string();
        if name.is_empty() {
            return Err(AccountError::validation("name", "cannot be empty"));
        }
        if cmd.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::validation(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        // 2. Reject taken emails
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        // 3. Create the account
        let password_hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| AccountError::credentials(e.to_string()))?;
        let is_admin = self.admin_emails.contains(&email);
        let user = User::register(NewUser {
            email,
            name,
            mobile: cmd.mobile.filter(|m| !m.trim().is_empty()),
            password_hash,
            is_admin,
        });

        self.users.create(&user).await.map_err(|e| match e {
            StorageError::Duplicate(_) => AccountError::EmailTaken,
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, is_admin, "User registered");
        issue_session(self.tokens.as_ref(), user)
    }
}
