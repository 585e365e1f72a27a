//! Top-level router assembly.
//!
//! ```text
//! /health                      public
//! /api/payment/webhook         signature-authenticated, no bearer layer
//! /api/payment/*               bearer layer
//! /api/courses/*               bearer layer (catalog reads are public)
//! /api/auth/*                  bearer layer (register and login are public)
//! ```

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::application::handlers::account::{AdminEmails, LoginRetryPolicy};
use crate::ports::{
    CourseRepository, PasswordHasher, PaymentProvider, PurchaseLedger, SessionValidator,
    TokenIssuer, UserRepository,
};

use super::account::{account_routes, AccountAppState};
use super::catalog::{catalog_routes, CatalogAppState};
use super::enrollment::{enrollment_routes, EnrollmentAppState};
use super::middleware::{auth_middleware, AuthState};
use super::payment::{payment_routes, webhook_routes, PaymentAppState};

/// Everything the HTTP layer needs, wired by the binary or by tests.
#[derive(Clone)]
pub struct AppDeps {
    pub users: Arc<dyn UserRepository>,
    pub ledger: Arc<dyn PurchaseLedger>,
    pub courses: Arc<dyn CourseRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub admin_emails: AdminEmails,
    pub login_retry: LoginRetryPolicy,
}

/// Builds the full application router.
pub fn app_router(deps: AppDeps) -> Router {
    let payment_state = PaymentAppState {
        ledger: deps.ledger.clone(),
        payment_provider: deps.payment_provider.clone(),
    };
    let enrollment_state = EnrollmentAppState {
        users: deps.users.clone(),
    };
    let catalog_state = CatalogAppState {
        courses: deps.courses.clone(),
    };
    let account_state = AccountAppState {
        users: deps.users.clone(),
        hasher: deps.password_hasher.clone(),
        tokens: deps.token_issuer.clone(),
        admin_emails: deps.admin_emails.clone(),
        login_retry: deps.login_retry,
    };

    let auth_state: AuthState = deps.session_validator.clone();

    let courses = Router::new()
        .merge(enrollment_routes().with_state(enrollment_state))
        .merge(catalog_routes().with_state(catalog_state));

    let authenticated = Router::new()
        .nest("/payment", payment_routes().with_state(payment_state.clone()))
        .nest("/courses", courses)
        .nest("/auth", account_routes().with_state(account_state))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let webhook = Router::new().nest("/payment", webhook_routes().with_state(payment_state));

    Router::new()
        .route("/health", get(health))
        .nest("/api", authenticated.merge(webhook))
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
