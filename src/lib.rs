pub mod config;
pub mod error;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::DbPool;
use modules::auth::auth_routes;
use modules::business::business_routes;
use modules::business::interface::BusinessStore;
use modules::role::interface::RoleStore;
use modules::role::role_routes;
use modules::user::interface::UserStore;
use modules::user::user_routes;
use services::jwt::JwtService;
use services::rate_limit::{create_rate_limiter, spawn_housekeeping, RateLimitLayer, ThrottleSettings};
use services::security::security_headers;
use services::totp::TwoFactorManager;

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub roles: Arc<dyn RoleStore>,
    pub businesses: Arc<dyn BusinessStore>,
    pub jwt_service: JwtService,
    pub two_factor: TwoFactorManager,
}

impl AppState {
    pub fn mysql(db: DbPool, jwt_service: JwtService, two_factor: TwoFactorManager) -> Self {
        Self {
            users: Arc::new(modules::user::crud::MySqlUserStore::new(db.clone())),
            roles: Arc::new(modules::role::crud::MySqlRoleStore::new(db.clone())),
            businesses: Arc::new(modules::business::crud::MySqlBusinessStore::new(db)),
            jwt_service,
            two_factor,
        }
    }

    /// All-in-memory state; what the integration suite runs against.
    pub fn in_memory(jwt_service: JwtService, two_factor: TwoFactorManager) -> Self {
        Self {
            users: Arc::new(modules::user::memory::InMemoryUserStore::new()),
            roles: Arc::new(modules::role::memory::InMemoryRoleStore::new()),
            businesses: Arc::new(modules::business::memory::InMemoryBusinessStore::new()),
            jwt_service,
            two_factor,
        }
    }
}

pub async fn create_app(state: AppState, throttle: ThrottleSettings) -> Router {
    let state = Arc::new(state);
    let rate_limiter = create_rate_limiter(throttle);
    spawn_housekeeping(&rate_limiter);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/roles", role_routes(state.clone()))
        .nest("/businesses", business_routes(state.clone()))
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(RateLimitLayer::new(rate_limiter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Venue Management API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
