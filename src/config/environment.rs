use std::env;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_hours: i64,
    pub throttle_ttl_secs: u64,
    pub throttle_limit: u32,
    pub app_name: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;

        let jwt_refresh_secret = env::var("JWT_REFRESH_SECRET")
            .map_err(|_| "JWT_REFRESH_SECRET must be set".to_string())?;

        let access_token_ttl_minutes = env::var("ACCESS_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let refresh_token_ttl_hours = env::var("REFRESH_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(48);

        let throttle_ttl_secs = env::var("THROTTLE_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let throttle_limit = env::var("THROTTLE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "venue-backend".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_refresh_secret,
            access_token_ttl_minutes,
            refresh_token_ttl_hours,
            throttle_ttl_secs,
            throttle_limit,
            app_name,
            port,
        })
    }
}
