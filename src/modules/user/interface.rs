use async_trait::async_trait;

use super::model::User;
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Credential store adapter. Email uniqueness is the store's job: a racing
/// duplicate insert (or email change) must come back as
/// `StoreError::Conflict`, never be pre-checked away.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>>;
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    /// Full-row update keyed on `user.id`. `NotFound` when the row is gone.
    async fn update(&self, user: &User) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}
