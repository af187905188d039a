use axum::routing::{delete, get, patch, post};
use axum::{middleware, Extension, Router};
use std::sync::Arc;

use super::controller;
use crate::modules::auth::guard::{authenticate, roles_guard, RequiredRoles};
use crate::AppState;

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let public = Router::new()
        .route("/", post(controller::register))
        .route("/login", post(controller::login))
        .route("/verify-email", post(controller::verify_email))
        .route(
            "/request-password-reset",
            post(controller::request_password_reset),
        )
        .route("/reset-password", post(controller::reset_password));

    // Authentication only.
    let authenticated = Router::new()
        .route("/", get(controller::list))
        .route("/profile", get(controller::profile))
        .route("/{id}", patch(controller::update))
        .route("/{id}/admin", post(controller::promote_to_admin));

    // Role-restricted routes: the metadata extension is attached outside the
    // guard so the guard sees it on the way in.
    let read_restricted = Router::new()
        .route("/{id}", get(controller::get_one))
        .route_layer(middleware::from_fn(roles_guard))
        .route_layer(Extension(RequiredRoles(&["USER", "BUSINESS"])));

    let delete_restricted = Router::new()
        .route("/{id}", delete(controller::delete))
        .route_layer(middleware::from_fn(roles_guard))
        .route_layer(Extension(RequiredRoles(&["BUSINESS"])));

    let protected = authenticated
        .merge(read_restricted)
        .merge(delete_restricted)
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    public.merge(protected)
}
