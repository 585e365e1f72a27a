//! Request and response types for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::account::{AuthSession, UserSummary};
use crate::domain::account::User;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user. Never carries credentials or enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub is_admin: bool,
    pub mobile: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.clone(),
            picture: user.picture.clone(),
            is_admin: user.is_admin,
            mobile: user.mobile.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserView::from(&session.user),
            token: session.token,
        }
    }
}

/// Row of the admin user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub is_admin: bool,
    pub progress: u8,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            name: summary.name,
            email: summary.email,
            mobile: summary.mobile,
            is_admin: summary.is_admin,
            progress: summary.progress,
        }
    }
}
