//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what survives bearer-token validation: the caller's
//! id and admin flag. It has no dependency on the token format; any
//! `SessionValidator` adapter can populate it.

use super::UserId;
use thiserror::Error;

/// Caller identity extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, is_admin: bool) -> Self {
        Self { id, is_admin }
    }
}

/// Authentication errors that can occur during token handling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token could not be issued or checked (key material, encoding).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
