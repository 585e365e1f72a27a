//! Bearer token issuance port.

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Issues signed bearer tokens that a matching `SessionValidator` accepts.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}
