use async_trait::async_trait;

use super::interface::{Result, RoleStore};
use super::model::{Role, RoleRow};
use crate::config::DbPool;
use crate::error::StoreError;

pub struct MySqlRoleStore {
    pool: DbPool,
}

impl MySqlRoleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn encode_permissions(role: &Role) -> Result<String> {
        serde_json::to_string(&role.permissions)
            .map_err(|e| StoreError::Corrupt(format!("role {} permissions: {e}", role.id)))
    }
}

#[async_trait]
impl RoleStore for MySqlRoleStore {
    async fn create(&self, role: &Role) -> Result<()> {
        let permissions = Self::encode_permissions(role)?;

        sqlx::query(
            r#"
            INSERT INTO roles (id, name, permissions, user_id, business_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&role.id)
        .bind(&role.name)
        .bind(&permissions)
        .bind(&role.user_id)
        .bind(&role.business_id)
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Role::try_from).transpose()
    }

    async fn find_by_name_in_scope(
        &self,
        name: &str,
        business_id: Option<&str>,
    ) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT * FROM roles WHERE name = ? AND business_id <=> ?",
        )
        .bind(name)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Role::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT * FROM roles ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT * FROM roles WHERE user_id = ? ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn update(&self, role: &Role) -> Result<()> {
        let permissions = Self::encode_permissions(role)?;

        let result = sqlx::query(
            r#"
            UPDATE roles SET name = ?, permissions = ?, business_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&role.name)
        .bind(&permissions)
        .bind(&role.business_id)
        .bind(role.updated_at)
        .bind(&role.id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
