//! User aggregate.

use crate::domain::enrollment::Enrollments;
use crate::domain::foundation::{Timestamp, UserId};

use super::Email;

/// A platform user together with their enrollment list.
///
/// The whole aggregate is persisted in one write, so enrollment mutations
/// and profile changes are never partially applied. `version` is the
/// revision this copy was loaded at; a write based on an older revision is
/// rejected by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub picture: Option<String>,
    pub mobile: Option<String>,
    /// Identity at an external provider, for accounts created through one.
    pub external_id: Option<String>,
    /// Absent for externally authenticated users.
    pub password_hash: Option<String>,
    pub is_admin: bool,
    pub enrollments: Enrollments,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i64,
}

/// Fields needed to register a password account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub name: String,
    pub mobile: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    /// Creates a new password account with no enrollments.
    pub fn register(new_user: NewUser) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            email: new_user.email,
            name: new_user.name,
            picture: None,
            mobile: new_user.mobile,
            external_id: None,
            password_hash: Some(new_user.password_hash),
            is_admin: new_user.is_admin,
            enrollments: Enrollments::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Grants admin rights. Returns true if the flag changed.
    pub fn promote_to_admin(&mut self) -> bool {
        if self.is_admin {
            return false;
        }
        self.is_admin = true;
        self.touch();
        true
    }

    /// Bumps `updated_at` after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            email: Email::parse("ada@example.com").unwrap(),
            name: "Ada".to_string(),
            mobile: None,
            password_hash: "$argon2id$stub".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn register_starts_without_enrollments() {
        let user = User::register(new_user());
        assert!(user.enrollments.is_empty());
        assert!(!user.is_admin);
        assert_eq!(user.password_hash.as_deref(), Some("$argon2id$stub"));
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.version, 0);
    }

    #[test]
    fn promote_to_admin_is_idempotent() {
        let mut user = User::register(new_user());
        assert!(user.promote_to_admin());
        assert!(!user.promote_to_admin());
        assert!(user.is_admin);
    }
}
