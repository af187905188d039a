use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, TestContext};

#[tokio::test]
async fn business_creation_requires_authentication() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/businesses")
        .json(&json!({ "name": "Harbor House" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_business_is_owned_by_the_caller() {
    let ctx = TestContext::new().await;
    let (id, token) = ctx.verified_account(&test_email(), "BUSINESS").await;

    let response = ctx
        .server
        .post("/businesses")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Harbor House" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Harbor House");
    assert_eq!(body["owner_id"], id.as_str());
}

#[tokio::test]
async fn listing_returns_only_the_callers_businesses() {
    let ctx = TestContext::new().await;
    let (_, owner) = ctx.verified_account(&test_email(), "BUSINESS").await;
    let (_, other) = ctx.verified_account(&test_email(), "BUSINESS").await;

    ctx.server
        .post("/businesses")
        .authorization_bearer(&owner)
        .json(&json!({ "name": "Harbor House" }))
        .await
        .assert_status(StatusCode::CREATED);

    let mine = ctx
        .server
        .get("/businesses")
        .authorization_bearer(&owner)
        .await;
    mine.assert_status_ok();
    assert_eq!(mine.json::<serde_json::Value>().as_array().unwrap().len(), 1);

    let theirs = ctx
        .server
        .get("/businesses")
        .authorization_bearer(&other)
        .await;
    theirs.assert_status_ok();
    assert!(theirs.json::<serde_json::Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_business_is_not_found() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.verified_account(&test_email(), "USER").await;

    ctx.server
        .get("/businesses/no-such-business")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
