use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::interface::{Result, RoleStore};
use super::model::Role;
use crate::error::StoreError;

#[derive(Default, Clone)]
pub struct InMemoryRoleStore {
    roles: Arc<RwLock<HashMap<String, Role>>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn create(&self, role: &Role) -> Result<()> {
        let mut roles = self.roles.write().await;
        if roles
            .values()
            .any(|r| r.name == role.name && r.business_id == role.business_id)
        {
            return Err(StoreError::Conflict);
        }
        roles.insert(role.id.clone(), role.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Role>> {
        Ok(self.roles.read().await.get(id).cloned())
    }

    async fn find_by_name_in_scope(
        &self,
        name: &str,
        business_id: Option<&str>,
    ) -> Result<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles
            .values()
            .find(|r| r.name == name && r.business_id.as_deref() == business_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(roles)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Role>> {
        let roles = self.roles.read().await;
        let mut assigned: Vec<Role> = roles
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        assigned.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(assigned)
    }

    async fn update(&self, role: &Role) -> Result<()> {
        let mut roles = self.roles.write().await;
        if !roles.contains_key(&role.id) {
            return Err(StoreError::NotFound);
        }
        if roles
            .values()
            .any(|r| r.id != role.id && r.name == role.name && r.business_id == role.business_id)
        {
            return Err(StoreError::Conflict);
        }
        roles.insert(role.id.clone(), role.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.roles
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
