//! Account handlers.
//!
//! ## Commands
//! - Registering a password account
//! - Logging in
//!
//! ## Queries
//! - Current user profile
//! - User listing with progress summary (admin)

mod get_current_user;
mod list_users;
mod login;
mod register;

pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};
pub use list_users::{ListUsersHandler, ListUsersQuery, UserSummary};
pub use login::{LoginCommand, LoginHandler, LoginRetryPolicy};
pub use register::{RegisterCommand, RegisterHandler};

use std::collections::HashSet;

use crate::domain::account::{AccountError, Email, User};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::TokenIssuer;

/// Emails that are granted admin rights on registration and login.
#[derive(Debug, Clone, Default)]
pub struct AdminEmails(HashSet<Email>);

impl AdminEmails {
    /// Builds the set from raw configuration values. Entries that are not
    /// valid addresses are skipped with a warning.
    pub fn from_config<S: AsRef<str>>(raw: &[S]) -> Self {
        let emails = raw
            .iter()
            .filter_map(|value| match Email::parse(value.as_ref()) {
                Ok(email) => Some(email),
                Err(e) => {
                    tracing::warn!(value = value.as_ref(), error = %e, "Ignoring invalid admin email");
                    None
                }
            })
            .collect();
        Self(emails)
    }

    pub fn contains(&self, email: &Email) -> bool {
        self.0.contains(email)
    }
}

/// Token plus user, returned by register and login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

fn issue_session(tokens: &dyn TokenIssuer, user: User) -> Result<AuthSession, AccountError> {
    let token = tokens
        .issue(&AuthenticatedUser::new(user.id, user.is_admin))
        .map_err(|e| AccountError::credentials(e.to_string()))?;
    Ok(AuthSession { token, user })
}
