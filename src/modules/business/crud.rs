use async_trait::async_trait;

use super::interface::{BusinessStore, Result};
use super::model::Business;
use crate::config::DbPool;
use crate::error::StoreError;

pub struct MySqlBusinessStore {
    pool: DbPool,
}

impl MySqlBusinessStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessStore for MySqlBusinessStore {
    async fn create(&self, business: &Business) -> Result<()> {
        sqlx::query(
            "INSERT INTO businesses (id, name, owner_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&business.id)
        .bind(&business.name)
        .bind(&business.owner_id)
        .bind(business.created_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Business>> {
        let business = sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(business)
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Business>> {
        let businesses = sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses WHERE owner_id = ? ORDER BY created_at",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(businesses)
    }
}
