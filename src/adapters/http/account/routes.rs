//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_users, login, me, register, AccountAppState};

/// Account routes.
///
/// ## Public
/// - `POST /register` - Create a password account
/// - `POST /login` - Exchange credentials for a token
///
/// ## Authenticated
/// - `GET /me` - Caller's profile
///
/// ## Admin
/// - `GET /users` - User listing with progress
pub fn account_routes() -> Router<AccountAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/users", get(list_users))
}
