//! Authentication adapters.
//!
//! - `jwt` - HS256 token issuance and validation
//! - `password` - Argon2 password hashing
//! - `mock` - Test validator that doesn't require signed tokens

mod jwt;
mod mock;
mod password;

pub use jwt::{JwtTokenService, TokenClaims};
pub use mock::MockSessionValidator;
pub use password::Argon2PasswordHasher;
