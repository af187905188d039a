use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

fn registration_body(email: &str) -> serde_json::Value {
    json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": email,
        "password": test_password(),
        "account_type": "USER"
    })
}

#[tokio::test]
async fn registration_returns_tokens_and_a_sanitized_user() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let response = ctx.server.post("/users").json(&registration_body(&email)).await;
    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert!(body["expires_in"].as_i64().unwrap() > 0);

    let user = &body["user"];
    assert_eq!(user["email"], email);
    assert_eq!(user["email_verified"], false);
    assert!(user.get("password_hash").is_none());
    assert!(user.get("two_factor_secret").is_none());
    assert!(user.get("verification_token").is_none());
    assert!(user.get("refresh_token_hash").is_none());
}

#[tokio::test]
async fn issued_tokens_validate_only_against_their_own_secret() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let body: serde_json::Value = ctx
        .server
        .post("/users")
        .json(&registration_body(&email))
        .await
        .json();

    let access = body["access_token"].as_str().unwrap();
    let refresh = body["refresh_token"].as_str().unwrap();

    assert!(ctx.jwt.verify_access_token(access).is_ok());
    assert!(ctx.jwt.verify_refresh_token(refresh).is_ok());
    // cross-validation must fail
    assert!(ctx.jwt.verify_refresh_token(access).is_err());
    assert!(ctx.jwt.verify_access_token(refresh).is_err());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/users")
        .json(&registration_body(&email))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.server.post("/users").json(&registration_body(&email)).await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn concurrent_duplicate_registration_yields_exactly_one_conflict() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let body = registration_body(&email);

    let (a, b) = tokio::join!(
        ctx.server.post("/users").json(&body),
        ctx.server.post("/users").json(&body)
    );

    let mut statuses = [a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn weak_password_is_rejected() {
    let ctx = TestContext::new().await;

    for password in ["short1A", "alllowercase1!", "ALLUPPERCASE1!", "NoDigitsOrSymbols"] {
        let response = ctx
            .server
            .post("/users")
            .json(&json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": test_email(),
                "password": password,
                "account_type": "USER"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn invalid_email_and_short_names_are_rejected() {
    let ctx = TestContext::new().await;

    let bad_email = ctx
        .server
        .post("/users")
        .json(&json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "not-an-email",
            "password": test_password(),
            "account_type": "USER"
        }))
        .await;
    bad_email.assert_status(StatusCode::BAD_REQUEST);

    let short_name = ctx
        .server
        .post("/users")
        .json(&json!({
            "first_name": "J",
            "last_name": "Doe",
            "email": test_email(),
            "password": test_password(),
            "account_type": "USER"
        }))
        .await;
    short_name.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_account_type_is_unprocessable() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/users")
        .json(&json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": test_email(),
            "password": test_password(),
            "account_type": "SUPERUSER"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
