use axum::routing::post;
use axum::{middleware, Router};
use std::sync::Arc;

use super::controller;
use super::guard::authenticate;
use crate::AppState;

pub fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let two_factor = Router::new()
        .route(
            "/two-factor/generate",
            post(controller::generate_two_factor_secret),
        )
        .route(
            "/two-factor/verify",
            post(controller::verify_two_factor_token),
        )
        .route("/two-factor/enable", post(controller::enable_two_factor))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/login", post(controller::login))
        .merge(two_factor)
}
