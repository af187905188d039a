use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{test_email, TestContext};

use venue_backend::modules::role::model::PermissionMap;

#[tokio::test]
async fn user_account_type_is_forbidden_from_business_admin_routes() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.verified_account(&test_email(), "USER").await;

    let response = ctx
        .server
        .post("/roles")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Manager",
            "permissions": { "reservations": ["read"] }
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("you do not have permission"));
}

#[tokio::test]
async fn business_account_type_passes_the_guard() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.verified_account(&test_email(), "BUSINESS").await;

    let response = ctx
        .server
        .post("/roles")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Manager",
            "permissions": { "reservations": ["read"] }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn admin_flag_bypasses_role_requirements() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (_, _) = ctx.verified_account(&email, "USER").await;
    ctx.make_admin(&email).await;
    let token = ctx.login_token(&email).await;

    // Past the guard; the service then reports the missing role.
    let response = ctx
        .server
        .patch(&format!("/roles/{}", Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Renamed" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assigned_role_name_grants_access_without_reservation_permissions() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (id, _) = ctx.verified_account(&email, "USER").await;

    // Role named after a required entry, with every permission list empty.
    ctx.seed_role(&id, "BUSINESS", PermissionMap::default()).await;
    let token = ctx.login_token(&email).await;

    let response = ctx
        .server
        .post("/roles")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Shift Lead",
            "permissions": {}
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn missing_and_garbage_tokens_are_unauthorized() {
    let ctx = TestContext::new().await;

    let missing = ctx.server.get("/users").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);

    let garbage = ctx
        .server
        .get("/users")
        .authorization_bearer("not.a.token")
        .await;
    garbage.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_rejected_as_a_bearer_credential() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register(&email, "USER").await;
    ctx.mark_verified(&email).await;

    let login: serde_json::Value = ctx
        .server
        .post("/users/login")
        .json(&json!({
            "email": &email,
            "password": crate::common::test_password()
        }))
        .await
        .json();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let response = ctx
        .server
        .get("/users")
        .authorization_bearer(refresh_token)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
