use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn unverified_account_cannot_login_even_with_correct_password() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register(&email, "USER").await;

    let response = ctx
        .server
        .post("/auth/login")
        .json(&json!({
            "email": &email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("verify your email"));
}

#[tokio::test]
async fn verified_account_logs_in_and_token_decodes_to_its_email() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register(&email, "USER").await;
    ctx.mark_verified(&email).await;

    let response = ctx
        .server
        .post("/auth/login")
        .json(&json!({
            "email": &email,
            "password": test_password()
        }))
        .await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let token = body["access_token"].as_str().unwrap();

    let claims = ctx.jwt.verify_access_token(token).unwrap();
    assert_eq!(claims.email, email);
    assert_eq!(claims.first_name, "Jane");
    assert!(!claims.is_admin);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register(&email, "USER").await;
    ctx.mark_verified(&email).await;

    let wrong_password = ctx
        .server
        .post("/auth/login")
        .json(&json!({
            "email": &email,
            "password": "WrongPassword123!"
        }))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_email = ctx
        .server
        .post("/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": test_password()
        }))
        .await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);

    // Indistinguishable bodies: no hint about which part was wrong.
    let a: serde_json::Value = wrong_password.json();
    let b: serde_json::Value = unknown_email.json();
    assert_eq!(a, b);
}

#[tokio::test]
async fn login_with_missing_fields_is_unprocessable() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/login")
        .json(&json!({ "email": test_email() }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
