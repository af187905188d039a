use async_trait::async_trait;

use super::model::Business;
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait BusinessStore: Send + Sync {
    async fn create(&self, business: &Business) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Business>>;
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Business>>;
}
