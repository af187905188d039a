use async_trait::async_trait;

use super::model::Role;
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn create(&self, role: &Role) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Role>>;
    /// Name lookup within one business scope; `None` is the scope of roles
    /// attached to no business.
    async fn find_by_name_in_scope(
        &self,
        name: &str,
        business_id: Option<&str>,
    ) -> Result<Option<Role>>;
    async fn list(&self) -> Result<Vec<Role>>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Role>>;
    async fn update(&self, role: &Role) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}
