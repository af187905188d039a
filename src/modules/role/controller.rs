use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use validator::Validate;

use super::model::Role;
use super::schema::{CreateRoleRequest, UpdateRoleRequest};
use super::service::RoleService;
use crate::error::ApiError;
use crate::modules::auth::guard::Principal;
use crate::modules::user::schema::MessageResponse;
use crate::AppState;

fn service(state: &AppState) -> RoleService<'_> {
    RoleService::new(
        state.roles.as_ref(),
        state.users.as_ref(),
        state.businesses.as_ref(),
    )
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let role = service(&state).create(&req, &principal.id).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn find_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Role>>, ApiError> {
    let roles = service(&state).find_all().await?;
    Ok(Json(roles))
}

pub async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Role>, ApiError> {
    let role = service(&state).find_one(&id).await?;
    Ok(Json(role))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let role = service(&state).update(&id, &req, &principal.id).await?;
    Ok(Json(role))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service(&state).remove(&id, &principal.id).await?;
    Ok(Json(MessageResponse {
        message: "Role deleted successfully".to_string(),
    }))
}
