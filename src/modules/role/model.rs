use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::StoreError;

/// Actions a role may be granted on a resource category. Unknown action
/// strings fail deserialization instead of silently passing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// Permission grants per resource category. Categories are fixed fields, not
/// free-form keys; a category absent from the payload means no grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMap {
    #[serde(default)]
    pub reservations: Vec<Action>,
    #[serde(default)]
    pub floor_plans: Vec<Action>,
    #[serde(default)]
    pub guests: Vec<Action>,
    #[serde(default)]
    pub settings: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub permissions: PermissionMap,
    pub user_id: String,
    pub business_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row shape: permissions live in a JSON text column.
#[derive(Debug, FromRow)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub permissions: String,
    pub user_id: String,
    pub business_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for Role {
    type Error = StoreError;

    fn try_from(row: RoleRow) -> Result<Self, StoreError> {
        let permissions = serde_json::from_str(&row.permissions)
            .map_err(|e| StoreError::Corrupt(format!("role {} permissions: {e}", row.id)))?;

        Ok(Role {
            id: row.id,
            name: row.name,
            permissions,
            user_id: row.user_id,
            business_id: row.business_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
