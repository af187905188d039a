use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::model::Business;
use super::schema::CreateBusinessRequest;
use crate::error::ApiError;
use crate::modules::auth::guard::Principal;
use crate::AppState;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateBusinessRequest>,
) -> Result<(StatusCode, Json<Business>), ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let business = Business {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        owner_id: principal.id,
        created_at: Utc::now(),
    };
    state.businesses.create(&business).await?;

    Ok((StatusCode::CREATED, Json(business)))
}

pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Business>>, ApiError> {
    let businesses = state.businesses.list_for_owner(&principal.id).await?;
    Ok(Json(businesses))
}

pub async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Business>, ApiError> {
    let business = state
        .businesses
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))?;
    Ok(Json(business))
}
