//! LoginHandler - Command handler for password login.
//!
//! The user lookup is retried locally with a bounded number of attempts,
//! each under its own timeout and separated by a fixed delay. A definite
//! answer ("no such user") is never retried.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::user_writes::modify_user;
use crate::domain::account::{AccountError, Email, User};
use crate::domain::foundation::UserId;
use crate::ports::{PasswordHasher, StorageError, TokenIssuer, UserRepository};

use super::{issue_session, AdminEmails, AuthSession};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Retry policy for the login user lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginRetryPolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub retry_delay: Duration,
}

impl Default for LoginRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(5),
            retry_delay: Duration::from_secs(1),
        }
    }
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    admin_emails: AdminEmails,
    retry: LoginRetryPolicy,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        admin_emails: AdminEmails,
        retry: LoginRetryPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            admin_emails,
            retry,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthSession, AccountError> {
        if cmd.email.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::validation(
                "credentials",
                "email and password are required",
            ));
        }
        let email = Email::parse(&cmd.email).map_err(|_| AccountError::InvalidCredentials)?;

        let user = self
            .find_with_retry(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let Some(hash) = user.password_hash.as_deref() else {
            tracing::debug!(user_id = %user.id, "Password login for externally authenticated user");
            return Err(AccountError::InvalidCredentials);
        };
        let matches = self
            .hasher
            .verify(&cmd.password, hash)
            .map_err(|e| AccountError::credentials(e.to_string()))?;
        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        let user = if self.admin_emails.contains(&user.email) && !user.is_admin {
            self.promote(&user.id).await?
        } else {
            user
        };

        tracing::info!(user_id = %user.id, "User logged in");
        issue_session(self.tokens.as_ref(), user)
    }

    /// Saves the admin flag without overwriting concurrent changes to the user.
    async fn promote(&self, user_id: &UserId) -> Result<User, AccountError> {
        let (promoted, _) = modify_user(self.users.as_ref(), user_id, |stored| {
            Ok::<_, AccountError>(stored.promote_to_admin())
        })
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

        tracing::info!(user_id = %promoted.id, "Promoted configured admin on login");
        Ok(promoted)
    }

    async fn find_with_retry(&self, email: &Email) -> Result<Option<User>, AccountError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match tokio::time::timeout(self.retry.attempt_timeout, self.users.find_by_email(email))
                .await
            {
                Ok(Ok(found)) => return Ok(found),
                Ok(Err(e)) => {
                    tracing::warn!(attempt, error = %e, "User lookup failed during login");
                    last_error = e.to_string();
                }
                Err(_) => {
                    tracing::warn!(attempt, "User lookup timed out during login");
                    last_error = StorageError::unavailable("lookup timed out").to_string();
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.retry.retry_delay).await;
            }
        }

        tracing::error!(attempts, error = %last_error, "User lookup retries exhausted");
        Err(AccountError::infrastructure(last_error))
    }
}
