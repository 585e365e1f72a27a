//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{error_response, status_for};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::account::{
    AdminEmails, GetCurrentUserHandler, GetCurrentUserQuery, ListUsersHandler, ListUsersQuery,
    LoginCommand, LoginHandler, LoginRetryPolicy, RegisterCommand, RegisterHandler,
};
use crate::domain::account::AccountError;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UserSummaryResponse, UserView};

#[derive(Clone)]
pub struct AccountAppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub admin_emails: AdminEmails,
    pub login_retry: LoginRetryPolicy,
}

impl AccountAppState {
    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.admin_emails.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.admin_emails.clone(),
            self.login_retry,
        )
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AccountAppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let session = state
        .register_handler()
        .handle(RegisterCommand {
            email: request.email,
            password: request.password,
            name: request.name,
            mobile: request.mobile,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AccountAppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let session = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(AuthResponse::from(session)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AccountAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AccountApiError> {
    let user = state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await?;

    Ok(Json(UserView::from(&user)))
}

/// GET /api/auth/users (admin only)
pub async fn list_users(
    State(state): State<AccountAppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AccountApiError> {
    let summaries = state.list_users_handler().handle(ListUsersQuery).await?;

    let response: Vec<UserSummaryResponse> =
        summaries.into_iter().map(UserSummaryResponse::from).collect();
    Ok(Json(response))
}

/// API error type that converts account errors to HTTP responses.
#[derive(Debug)]
pub struct AccountApiError(AccountError);

impl From<AccountError> for AccountApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        error_response(status_for(code), code, self.0.message())
    }
}
