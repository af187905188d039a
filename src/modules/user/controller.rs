use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use validator::Validate;

use super::schema::{
    AdminPromotionResponse, CreateUserRequest, LoginRequest, MessageResponse,
    RequestPasswordResetRequest, ResetPasswordRequest, TokenPairResponse, UpdateUserRequest,
    UserResponse, VerifyEmailRequest,
};
use super::schema::RegisterResponse;
use super::service::UsersService;
use crate::error::ApiError;
use crate::modules::auth::guard::Principal;
use crate::AppState;

fn service(state: &AppState) -> UsersService<'_> {
    UsersService::new(state.users.as_ref(), &state.jwt_service)
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let registered = service(&state).register(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserResponse::from(&registered.user),
            access_token: registered.tokens.access_token,
            refresh_token: registered.tokens.refresh_token,
            token_type: "Bearer",
            expires_in: registered.tokens.expires_in,
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let registered = service(&state).login(&req.email, &req.password).await?;

    Ok(Json(TokenPairResponse {
        access_token: registered.tokens.access_token,
        refresh_token: registered.tokens.refresh_token,
        token_type: "Bearer",
        expires_in: registered.tokens.expires_in,
    }))
}

pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    service(&state).verify_email(&req.token).await?;
    Ok(Json(MessageResponse {
        message: "Email verified successfully".to_string(),
    }))
}

pub async fn request_password_reset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RequestPasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    service(&state).request_password_reset(&req.email).await?;
    Ok(Json(MessageResponse {
        message: "Password reset requested".to_string(),
    }))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    service(&state)
        .reset_password(&req.token, &req.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = service(&state).list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service(&state).get(&principal.id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service(&state).get(&id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = service(&state).update(&id, &req).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !principal.is_admin {
        return Err(ApiError::Forbidden(
            "Only admins can delete users".to_string(),
        ));
    }

    service(&state).delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

pub async fn promote_to_admin(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<AdminPromotionResponse>), ApiError> {
    if !principal.is_admin {
        return Err(ApiError::Forbidden(
            "Only admins can promote users".to_string(),
        ));
    }

    let user = service(&state).promote_to_admin(&id).await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminPromotionResponse {
            message: "User is now an admin",
            user: UserResponse::from(&user),
        }),
    ))
}
