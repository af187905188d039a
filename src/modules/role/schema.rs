use serde::Deserialize;
use validator::Validate;

use super::model::PermissionMap;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "Role name must be 1-50 characters"))]
    pub name: String,

    pub permissions: PermissionMap,

    #[serde(default)]
    pub business_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "Role name must be 1-50 characters"))]
    pub name: Option<String>,

    pub permissions: Option<PermissionMap>,

    #[serde(default)]
    pub business_id: Option<String>,
}
