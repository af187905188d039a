use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

use super::guard::Principal;
use super::schema::{
    LoginRequest, LoginResponse, TwoFactorEnabledResponse, TwoFactorSecretResponse,
    VerifyTwoFactorRequest,
};
use super::service::AuthService;
use crate::error::ApiError;
use crate::AppState;

fn service(state: &AppState) -> AuthService<'_> {
    AuthService::new(
        state.users.as_ref(),
        &state.jwt_service,
        &state.two_factor,
    )
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let service = service(&state);

    let user = service
        .validate_credentials(&req.email, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let access_token = service.login(&user)?;
    Ok(Json(LoginResponse { access_token }))
}

pub async fn generate_two_factor_secret(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<TwoFactorSecretResponse>, ApiError> {
    let enrollment = service(&state)
        .generate_two_factor_secret(&principal.id)
        .await?;

    Ok(Json(TwoFactorSecretResponse {
        secret: enrollment.secret,
        otpauth_url: enrollment.otpauth_url,
    }))
}

pub async fn verify_two_factor_token(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<VerifyTwoFactorRequest>,
) -> Result<Json<bool>, ApiError> {
    let valid = service(&state)
        .verify_two_factor_token(&principal.id, &req.token)
        .await?;
    Ok(Json(valid))
}

pub async fn enable_two_factor(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<TwoFactorEnabledResponse>, ApiError> {
    let message = service(&state).enable_two_factor(&principal.id).await?;
    Ok(Json(TwoFactorEnabledResponse { message }))
}
