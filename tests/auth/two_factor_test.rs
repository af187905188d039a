use axum::http::StatusCode;
use serde_json::json;
use totp_rs::{Algorithm, Secret, TOTP};

use crate::common::{test_email, TestContext};

use venue_backend::modules::user::interface::UserStore;

fn live_code(secret_base32: &str) -> String {
    let secret = Secret::Encoded(secret_base32.to_string()).to_bytes().unwrap();
    let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret, None, "test".to_string()).unwrap();
    totp.generate_current().unwrap()
}

/// Code guaranteed outside the accepted skew window of `secret_base32`.
fn stale_code(secret_base32: &str) -> String {
    let secret = Secret::Encoded(secret_base32.to_string()).to_bytes().unwrap();
    let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret, None, "test".to_string()).unwrap();

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let window = [
        totp.generate(now - 30),
        totp.generate(now),
        totp.generate(now + 30),
    ];

    ["000000", "111111", "222222", "333333"]
        .into_iter()
        .find(|c| !window.contains(&c.to_string()))
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn generate_requires_a_bearer_token() {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/auth/two-factor/generate").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn generate_returns_secret_and_enrollment_uri() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (_, token) = ctx.verified_account(&email, "USER").await;

    let response = ctx
        .server
        .post("/auth/two-factor/generate")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let secret = body["secret"].as_str().unwrap();
    let url = body["otpauthUrl"].as_str().unwrap();

    assert!(!secret.is_empty());
    assert!(url.starts_with("otpauth://totp/"));
    assert!(url.contains(secret));

    // the secret is persisted against the account
    let user = ctx.users.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(user.two_factor_secret.as_deref(), Some(secret));
}

#[tokio::test]
async fn verify_accepts_a_live_code_and_rejects_a_stale_one() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (_, token) = ctx.verified_account(&email, "USER").await;

    let generate = ctx
        .server
        .post("/auth/two-factor/generate")
        .authorization_bearer(&token)
        .await;
    let body: serde_json::Value = generate.json();
    let secret = body["secret"].as_str().unwrap();

    let ok = ctx
        .server
        .post("/auth/two-factor/verify")
        .authorization_bearer(&token)
        .json(&json!({ "token": live_code(secret) }))
        .await;
    ok.assert_status_ok();
    assert_eq!(ok.json::<bool>(), true);

    let bad = ctx
        .server
        .post("/auth/two-factor/verify")
        .authorization_bearer(&token)
        .json(&json!({ "token": stale_code(secret) }))
        .await;
    bad.assert_status_ok();
    assert_eq!(bad.json::<bool>(), false);
}

#[tokio::test]
async fn verify_without_enrollment_is_not_found() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.verified_account(&test_email(), "USER").await;

    let response = ctx
        .server
        .post("/auth/two-factor/verify")
        .authorization_bearer(&token)
        .json(&json!({ "token": "123456" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enable_without_a_generated_secret_is_not_found() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.verified_account(&test_email(), "USER").await;

    let response = ctx
        .server
        .post("/auth/two-factor/enable")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enable_sets_the_flag_and_is_idempotent() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (_, token) = ctx.verified_account(&email, "USER").await;

    ctx.server
        .post("/auth/two-factor/generate")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let first = ctx
        .server
        .post("/auth/two-factor/enable")
        .authorization_bearer(&token)
        .await;
    first.assert_status_ok();

    let body: serde_json::Value = first.json();
    assert!(body["message"].as_str().unwrap().contains("Jane"));

    let user = ctx.users.find_by_email(&email).await.unwrap().unwrap();
    assert!(user.two_factor_enabled);

    // second call succeeds and leaves the state enabled
    let second = ctx
        .server
        .post("/auth/two-factor/enable")
        .authorization_bearer(&token)
        .await;
    second.assert_status_ok();

    let user = ctx.users.find_by_email(&email).await.unwrap().unwrap();
    assert!(user.two_factor_enabled);
}

#[tokio::test]
async fn regenerating_replaces_the_stored_secret() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (_, token) = ctx.verified_account(&email, "USER").await;

    let first: serde_json::Value = ctx
        .server
        .post("/auth/two-factor/generate")
        .authorization_bearer(&token)
        .await
        .json();
    let second: serde_json::Value = ctx
        .server
        .post("/auth/two-factor/generate")
        .authorization_bearer(&token)
        .await
        .json();

    let old_secret = first["secret"].as_str().unwrap();
    let new_secret = second["secret"].as_str().unwrap();
    assert_ne!(old_secret, new_secret);

    let user = ctx.users.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(user.two_factor_secret.as_deref(), Some(new_secret));

    // a code minted from the replaced secret no longer verifies
    let stale = ctx
        .server
        .post("/auth/two-factor/verify")
        .authorization_bearer(&token)
        .json(&json!({ "token": live_code(old_secret) }))
        .await;
    stale.assert_status_ok();
    assert_eq!(stale.json::<bool>(), false);
}
