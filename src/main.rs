use std::net::SocketAddr;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use venue_backend::config::{environment::Config, init_db};
use venue_backend::services::jwt::JwtService;
use venue_backend::services::rate_limit::ThrottleSettings;
use venue_backend::services::totp::TwoFactorManager;
use venue_backend::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "venue_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url).await;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Connected to MySQL");

    let jwt_service = JwtService::with_ttls(
        config.jwt_secret,
        config.jwt_refresh_secret,
        ChronoDuration::minutes(config.access_token_ttl_minutes),
        ChronoDuration::hours(config.refresh_token_ttl_hours),
    );
    let two_factor = TwoFactorManager::new(config.app_name);

    let state = AppState::mysql(db, jwt_service, two_factor);
    let throttle = ThrottleSettings {
        ttl: Duration::from_secs(config.throttle_ttl_secs),
        limit: config.throttle_limit,
    };
    let app = venue_backend::create_app(state, throttle).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tracing::info!("Server running on http://{addr}");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
