use axum::routing::{delete, get, patch, post};
use axum::{middleware, Extension, Router};
use std::sync::Arc;

use super::controller;
use crate::modules::auth::guard::{authenticate, roles_guard, RequiredRoles};
use crate::AppState;

pub fn role_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Reads need authentication only.
    let reads = Router::new()
        .route("/", get(controller::find_all))
        .route("/{id}", get(controller::find_one));

    let writes = Router::new()
        .route("/", post(controller::create))
        .route("/{id}", patch(controller::update))
        .route("/{id}", delete(controller::remove))
        .route_layer(middleware::from_fn(roles_guard))
        .route_layer(Extension(RequiredRoles(&["BUSINESS", "ADMIN"])));

    reads
        .merge(writes)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
