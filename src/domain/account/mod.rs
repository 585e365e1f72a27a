//! Account domain - user identity and credentials.

mod email;
mod errors;
mod user;

pub use email::Email;
pub use errors::AccountError;
pub use user::{NewUser, User};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;
