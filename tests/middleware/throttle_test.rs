use std::time::Duration;

use axum::http::StatusCode;

use crate::common::TestContext;

use venue_backend::services::rate_limit::ThrottleSettings;

#[tokio::test]
async fn requests_over_the_limit_are_throttled() {
    let ctx = TestContext::with_throttle(ThrottleSettings {
        ttl: Duration::from_secs(60),
        limit: 3,
    })
    .await;

    for _ in 0..3 {
        ctx.server.get("/health").await.assert_status_ok();
    }

    let throttled = ctx.server.get("/health").await;
    throttled.assert_status(StatusCode::TOO_MANY_REQUESTS);

    let body: serde_json::Value = throttled.json();
    assert_eq!(body["error"], "Too many requests");
}

#[tokio::test]
async fn forwarded_clients_are_throttled_independently() {
    let ctx = TestContext::with_throttle(ThrottleSettings {
        ttl: Duration::from_secs(60),
        limit: 2,
    })
    .await;

    for _ in 0..2 {
        ctx.server
            .get("/health")
            .add_header("x-forwarded-for", "203.0.113.7")
            .await
            .assert_status_ok();
    }
    ctx.server
        .get("/health")
        .add_header("x-forwarded-for", "203.0.113.7")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // a different forwarded client still has quota
    ctx.server
        .get("/health")
        .add_header("x-forwarded-for", "203.0.113.8")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;
    response.assert_status_ok();

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(
        response.headers().get("x-frame-options").unwrap(),
        "SAMEORIGIN"
    );
    assert!(response.headers().get("strict-transport-security").is_some());
}
