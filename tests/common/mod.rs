//! Shared harness for HTTP integration tests.
//!
//! Builds the real router over in-memory adapters, the mock payment provider
//! and a real HS256 token service.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use academy::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use academy::adapters::http::{app_router, AppDeps};
use academy::adapters::memory::{
    InMemoryCourseRepository, InMemoryPurchaseLedger, InMemoryUserRepository,
};
use academy::adapters::stripe::{signature_header, MockPaymentProvider};
use academy::application::handlers::account::{AdminEmails, LoginRetryPolicy};

pub const WEBHOOK_SECRET: &str = "whsec_integration";
pub const ADMIN_EMAIL: &str = "admin@academy.test";

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub ledger: Arc<InMemoryPurchaseLedger>,
    pub provider: Arc<MockPaymentProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let ledger = Arc::new(InMemoryPurchaseLedger::new());
        let provider = Arc::new(MockPaymentProvider::new(WEBHOOK_SECRET));
        let tokens = Arc::new(JwtTokenService::new(
            &SecretString::new("integration-secret".to_string()),
            chrono::Duration::hours(1),
        ));

        let deps = AppDeps {
            users: users.clone(),
            ledger: ledger.clone(),
            courses: Arc::new(InMemoryCourseRepository::new()),
            payment_provider: provider.clone(),
            session_validator: tokens.clone(),
            token_issuer: tokens,
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            admin_emails: AdminEmails::from_config(&[ADMIN_EMAIL]),
            login_retry: LoginRetryPolicy {
                max_attempts: 2,
                attempt_timeout: Duration::from_millis(200),
                retry_delay: Duration::from_millis(10),
            },
        };

        Self {
            router: app_router(deps),
            users,
            ledger,
            provider,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Registers an account and returns `(token, user_id)`.
    pub async fn register(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .send(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({"email": email, "password": "secret123", "name": "Test User"}),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// Delivers a signed `payment_intent.succeeded` event.
    pub async fn deliver_payment(
        &self,
        event_id: &str,
        user_id: &str,
        course_id: &str,
        amount_minor: i64,
    ) -> (StatusCode, Value) {
        let payload = payment_succeeded(event_id, user_id, course_id, amount_minor);
        self.send(signed_webhook(&payload)).await
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn payment_succeeded(event_id: &str, user_id: &str, course_id: &str, amount_minor: i64) -> Vec<u8> {
    json!({
        "id": event_id,
        "object": "event",
        "type": "payment_intent.succeeded",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": {
            "object": {
                "id": format!("pi_{}", event_id),
                "object": "payment_intent",
                "amount": amount_minor,
                "currency": "usd",
                "status": "succeeded",
                "metadata": {"courseId": course_id, "userId": user_id}
            }
        }
    })
    .to_string()
    .into_bytes()
}

pub fn signed_webhook(payload: &[u8]) -> Request<Body> {
    let signature = signature_header(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), payload);
    Request::builder()
        .method("POST")
        .uri("/api/payment/webhook")
        .header("Stripe-Signature", signature)
        .body(Body::from(payload.to_vec()))
        .unwrap()
}
