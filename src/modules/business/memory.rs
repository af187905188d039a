use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::interface::{BusinessStore, Result};
use super::model::Business;

#[derive(Default, Clone)]
pub struct InMemoryBusinessStore {
    businesses: Arc<RwLock<HashMap<String, Business>>>,
}

impl InMemoryBusinessStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BusinessStore for InMemoryBusinessStore {
    async fn create(&self, business: &Business) -> Result<()> {
        self.businesses
            .write()
            .await
            .insert(business.id.clone(), business.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Business>> {
        Ok(self.businesses.read().await.get(id).cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Business>> {
        let businesses = self.businesses.read().await;
        let mut owned: Vec<Business> = businesses
            .values()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(owned)
    }
}
