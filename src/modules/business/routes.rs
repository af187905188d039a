use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

use super::controller;
use crate::modules::auth::guard::authenticate;
use crate::AppState;

pub fn business_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(controller::create))
        .route("/", get(controller::list_mine))
        .route("/{id}", get(controller::find_one))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
