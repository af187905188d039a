use chrono::Utc;
use uuid::Uuid;

use super::interface::RoleStore;
use super::model::Role;
use super::schema::{CreateRoleRequest, UpdateRoleRequest};
use crate::error::{ApiError, StoreError};
use crate::modules::business::interface::BusinessStore;
use crate::modules::user::interface::UserStore;

/// Role CRUD with the ownership and privilege rules enforced at the service
/// layer: creation needs verified business ownership, mutation needs the
/// admin flag.
pub struct RoleService<'a> {
    roles: &'a dyn RoleStore,
    users: &'a dyn UserStore,
    businesses: &'a dyn BusinessStore,
}

impl<'a> RoleService<'a> {
    pub fn new(
        roles: &'a dyn RoleStore,
        users: &'a dyn UserStore,
        businesses: &'a dyn BusinessStore,
    ) -> Self {
        Self {
            roles,
            users,
            businesses,
        }
    }

    pub async fn create(&self, req: &CreateRoleRequest, caller_id: &str) -> Result<Role, ApiError> {
        if let Some(business_id) = &req.business_id {
            let owned = self.businesses.list_for_owner(caller_id).await?;
            if !owned.iter().any(|b| &b.id == business_id) {
                return Err(ApiError::Forbidden(
                    "You are not the owner of this business account.".to_string(),
                ));
            }
        }

        let existing = self
            .roles
            .find_by_name_in_scope(&req.name, req.business_id.as_deref())
            .await?;
        if let Some(existing) = existing {
            return Err(ApiError::Conflict(format!(
                "Role with name {} already exists",
                existing.name
            )));
        }

        if self.users.find_by_id(caller_id).await?.is_none() {
            return Err(ApiError::Forbidden(
                "You are not allowed to create a role".to_string(),
            ));
        }

        if let Some(business_id) = &req.business_id {
            if self.businesses.find_by_id(business_id).await?.is_none() {
                return Err(ApiError::NotFound("Business not found".to_string()));
            }
        }

        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4().to_string(),
            name: req.name.clone(),
            permissions: req.permissions.clone(),
            user_id: caller_id.to_string(),
            business_id: req.business_id.clone(),
            created_at: now,
            updated_at: now,
        };

        // A racing create of the same name lands here as a store conflict.
        self.roles.create(&role).await.map_err(|e| match e {
            StoreError::Conflict => {
                ApiError::Conflict(format!("Role with name {} already exists", role.name))
            }
            other => other.into(),
        })?;

        Ok(role)
    }

    pub async fn find_all(&self) -> Result<Vec<Role>, ApiError> {
        Ok(self.roles.list().await?)
    }

    pub async fn find_one(&self, id: &str) -> Result<Role, ApiError> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Role with ID {id} not found")))
    }

    pub async fn update(
        &self,
        id: &str,
        req: &UpdateRoleRequest,
        caller_id: &str,
    ) -> Result<Role, ApiError> {
        let mut role = self.find_one(id).await?;
        self.require_admin(caller_id, "Only admins can update roles")
            .await?;

        if let Some(name) = &req.name {
            role.name = name.clone();
        }
        if let Some(permissions) = &req.permissions {
            role.permissions = permissions.clone();
        }
        if req.business_id.is_some() {
            role.business_id = req.business_id.clone();
        }
        role.updated_at = Utc::now();

        self.roles.update(&role).await.map_err(|e| match e {
            StoreError::Conflict => {
                ApiError::Conflict(format!("Role with name {} already exists", role.name))
            }
            StoreError::NotFound => ApiError::NotFound(format!("Role with ID {id} not found")),
            other => other.into(),
        })?;

        Ok(role)
    }

    pub async fn remove(&self, id: &str, caller_id: &str) -> Result<(), ApiError> {
        self.require_admin(caller_id, "Only admins can delete roles")
            .await?;

        self.roles.delete(id).await.map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound(format!("Role with ID {id} not found")),
            other => other.into(),
        })
    }

    async fn require_admin(&self, caller_id: &str, message: &str) -> Result<(), ApiError> {
        let caller = self.users.find_by_id(caller_id).await?;
        match caller {
            Some(user) if user.is_admin => Ok(()),
            _ => Err(ApiError::Forbidden(message.to_string())),
        }
    }
}
