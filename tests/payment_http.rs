//! Integration tests for the payment flow over HTTP.
//!
//! Checkout, webhook reconciliation and purchase history, end to end through
//! the router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use academy::ports::PaymentError;
use common::{get, json_request, payment_succeeded, signed_webhook, TestApp};

// =============================================================================
// Create payment intent
// =============================================================================

#[tokio::test]
async fn create_intent_returns_client_secret_and_charges_minor_units() {
    let app = TestApp::new();
    let (token, _) = app.register("buyer@academy.test").await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/payment/create-payment-intent",
            Some(&token),
            json!({"courseId": "course-1", "amount": 2500}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientSecret"], "pi_mock_1_secret_1");
    let intents = app.provider.created_intents();
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].amount.minor(), 250_000);
}

#[tokio::test]
async fn create_intent_requires_bearer_token() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/payment/create-payment-intent",
            None,
            json!({"courseId": "course-1", "amount": 2500}),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn create_intent_rejects_missing_fields() {
    let app = TestApp::new();
    let (token, _) = app.register("buyer@academy.test").await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/payment/create-payment-intent",
            Some(&token),
            json!({"courseId": "course-1"}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(app.provider.created_intents().is_empty());
}

#[tokio::test]
async fn create_intent_rejects_non_numeric_amount() {
    let app = TestApp::new();
    let (token, _) = app.register("buyer@academy.test").await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/payment/create-payment-intent",
            Some(&token),
            json!({"courseId": "course-1", "amount": "abc"}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].is_string());
    assert!(app.provider.created_intents().is_empty());
}

#[tokio::test]
async fn create_intent_after_purchase_is_rejected_without_provider_call() {
    let app = TestApp::new();
    let (token, user_id) = app.register("buyer@academy.test").await;
    let (status, _) = app.deliver_payment("evt_1", &user_id, "course-1", 250_000).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/payment/create-payment-intent",
            Some(&token),
            json!({"courseId": "course-1", "amount": 2500}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_PURCHASED");
    assert!(app.provider.created_intents().is_empty());
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let app = TestApp::new();
    let (token, _) = app.register("buyer@academy.test").await;
    app.provider.fail_next(PaymentError::network("connection reset"));

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/payment/create-payment-intent",
            Some(&token),
            json!({"courseId": "course-1", "amount": 10}),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PAYMENT_PROVIDER_ERROR");
}

// =============================================================================
// Webhook
// =============================================================================

#[tokio::test]
async fn redelivered_event_records_one_purchase() {
    let app = TestApp::new();
    let (_, user_id) = app.register("buyer@academy.test").await;

    for _ in 0..3 {
        let (status, body) = app.deliver_payment("evt_1", &user_id, "course-1", 250_000).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"received": true}));
    }

    let records = app.ledger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].course_ref.as_str(), "course-1");
}

#[tokio::test]
async fn webhook_with_bad_signature_is_rejected() {
    let app = TestApp::new();
    let payload = payment_succeeded("evt_1", &uuid::Uuid::new_v4().to_string(), "course-1", 100);

    let request = Request::builder()
        .method("POST")
        .uri("/api/payment/webhook")
        .header("Stripe-Signature", "t=1,v1=deadbeef")
        .body(Body::from(payload))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SIGNATURE_INVALID");
    assert!(app.ledger.records().is_empty());
}

#[tokio::test]
async fn webhook_ignores_bearer_layer() {
    let app = TestApp::new();
    let payload = payment_succeeded("evt_1", &uuid::Uuid::new_v4().to_string(), "course-1", 100);
    let mut request = signed_webhook(&payload);
    request
        .headers_mut()
        .insert("Authorization", "Bearer not-a-token".parse().unwrap());

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.ledger.records().len(), 1);
}

#[tokio::test]
async fn unrelated_event_is_acknowledged() {
    let app = TestApp::new();
    let payload = json!({
        "id": "evt_other",
        "type": "customer.created",
        "created": chrono::Utc::now().timestamp(),
        "data": {"object": {"id": "cus_1"}}
    })
    .to_string()
    .into_bytes();

    let (status, body) = app.send(signed_webhook(&payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
    assert!(app.ledger.records().is_empty());
}

#[tokio::test]
async fn zero_amount_payment_is_acknowledged_without_record() {
    let app = TestApp::new();
    let user_id = uuid::Uuid::new_v4().to_string();

    let (status, body) = app.deliver_payment("evt_zero", &user_id, "course-1", 0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
    assert!(app.ledger.records().is_empty());
}

// =============================================================================
// Purchase history
// =============================================================================

#[tokio::test]
async fn purchased_courses_lists_only_the_callers_records() {
    let app = TestApp::new();
    let (token, user_id) = app.register("buyer@academy.test").await;
    let (_, other_id) = app.register("other@academy.test").await;
    app.deliver_payment("evt_1", &user_id, "course-1", 250_000).await;
    app.deliver_payment("evt_2", &other_id, "course-2", 100_000).await;

    let (status, body) = app
        .send(get("/api/payment/purchased-courses", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["courseId"], "course-1");
    assert_eq!(records[0]["userId"], user_id.as_str());
    assert_eq!(records[0]["amount"], 2500);
    assert_eq!(records[0]["status"], "completed");
}

#[tokio::test]
async fn purchased_courses_empty_for_new_user() {
    let app = TestApp::new();
    let (token, _) = app.register("buyer@academy.test").await;

    let (status, body) = app
        .send(get("/api/payment/purchased-courses", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
