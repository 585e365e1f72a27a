//! Password hashing port.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// Hashes and verifies passwords. Implementations are CPU-bound and sync.
pub trait PasswordHasher: Send + Sync {
    /// Produces a self-describing hash (algorithm, params, salt).
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Returns `Ok(false)` for a well-formed hash that does not match.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
