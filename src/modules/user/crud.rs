use async_trait::async_trait;

use super::interface::{Result, UserStore};
use super::model::User;
use crate::config::DbPool;
use crate::error::StoreError;

pub struct MySqlUserStore {
    pool: DbPool,
}

impl MySqlUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn create(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, first_name, last_name, email, password_hash, account_type,
                 is_admin, email_verified, two_factor_enabled, two_factor_secret,
                 verification_token, reset_password_token, reset_password_expires,
                 refresh_token_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.account_type)
        .bind(user.is_admin)
        .bind(user.email_verified)
        .bind(user.two_factor_enabled)
        .bind(&user.two_factor_secret)
        .bind(&user.verification_token)
        .bind(&user.reset_password_token)
        .bind(user.reset_password_expires)
        .bind(&user.refresh_token_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE verification_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE reset_password_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                first_name = ?, last_name = ?, email = ?, password_hash = ?,
                account_type = ?, is_admin = ?, email_verified = ?,
                two_factor_enabled = ?, two_factor_secret = ?,
                verification_token = ?, reset_password_token = ?,
                reset_password_expires = ?, refresh_token_hash = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.account_type)
        .bind(user.is_admin)
        .bind(user.email_verified)
        .bind(user.two_factor_enabled)
        .bind(&user.two_factor_secret)
        .bind(&user.verification_token)
        .bind(&user.reset_password_token)
        .bind(user.reset_password_expires)
        .bind(&user.refresh_token_hash)
        .bind(user.updated_at)
        .bind(&user.id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
