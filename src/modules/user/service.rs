use chrono::{Duration, Utc};
use uuid::Uuid;

use super::interface::UserStore;
use super::model::{AccountType, User};
use super::schema::{CreateUserRequest, UpdateUserRequest};
use crate::error::{ApiError, StoreError};
use crate::services::hashing;
use crate::services::jwt::{JwtService, TokenPair};

const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Account lifecycle operations over the credential store. Constructed per
/// request from the shared state.
pub struct UsersService<'a> {
    store: &'a dyn UserStore,
    jwt: &'a JwtService,
}

pub struct RegisteredUser {
    pub user: User,
    pub tokens: TokenPair,
}

impl<'a> UsersService<'a> {
    pub fn new(store: &'a dyn UserStore, jwt: &'a JwtService) -> Self {
        Self { store, jwt }
    }

    /// Creates the account and logs it straight in. The fresh account is
    /// unverified; only the dedicated `/auth/login` path gates on
    /// verification.
    pub async fn register(&self, req: &CreateUserRequest) -> Result<RegisteredUser, ApiError> {
        let password_hash = hashing::hash_password(&req.password).map_err(|e| {
            tracing::error!("password hashing failed: {e}");
            ApiError::Internal
        })?;

        let now = Utc::now();
        let mut user = User {
            id: Uuid::new_v4().to_string(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password_hash,
            account_type: req.account_type,
            is_admin: false,
            email_verified: false,
            two_factor_enabled: false,
            two_factor_secret: None,
            verification_token: Some(Uuid::new_v4().to_string()),
            reset_password_token: None,
            reset_password_expires: None,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        };

        self.store.create(&user).await.map_err(|e| match e {
            StoreError::Conflict => ApiError::Conflict("Email already in use".to_string()),
            other => other.into(),
        })?;

        let tokens = self.issue_token_pair(&mut user).await?;
        Ok(RegisteredUser { user, tokens })
    }

    /// Token-pair login. Missing account and wrong password are one uniform
    /// failure; this path does not gate on email verification.
    pub async fn login(&self, email: &str, password: &str) -> Result<RegisteredUser, ApiError> {
        let user = self.store.find_by_email(email).await?;

        let mut user = match user {
            Some(user) if hashing::verify_password(password, &user.password_hash) => user,
            _ => {
                return Err(ApiError::Unauthorized(
                    "Invalid email or password".to_string(),
                ))
            }
        };

        let tokens = self.issue_token_pair(&mut user).await?;
        Ok(RegisteredUser { user, tokens })
    }

    async fn issue_token_pair(&self, user: &mut User) -> Result<TokenPair, ApiError> {
        let access_token = self.jwt.create_access_token(user).map_err(|e| {
            tracing::error!("access token signing failed: {e}");
            ApiError::Internal
        })?;
        let refresh_token = self.jwt.create_refresh_token(&user.id).map_err(|e| {
            tracing::error!("refresh token signing failed: {e}");
            ApiError::Internal
        })?;

        // Only a digest of the refresh token is persisted.
        user.refresh_token_hash = Some(hashing::hash_token(&refresh_token).map_err(|e| {
            tracing::error!("refresh token hashing failed: {e}");
            ApiError::Internal
        })?);
        user.updated_at = Utc::now();
        self.store.update(user).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.jwt.get_access_token_duration_secs(),
        })
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    pub async fn update(&self, id: &str, req: &UpdateUserRequest) -> Result<User, ApiError> {
        let mut user = self.get(id).await?;

        if let Some(first_name) = &req.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &req.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(email) = &req.email {
            user.email = email.clone();
        }
        if let Some(account_type) = req.account_type {
            user.account_type = account_type;
        }
        if let Some(password) = &req.password {
            user.password_hash = hashing::hash_password(password).map_err(|e| {
                tracing::error!("password hashing failed: {e}");
                ApiError::Internal
            })?;
        }

        user.updated_at = Utc::now();
        self.store.update(&user).await.map_err(|e| match e {
            StoreError::Conflict => ApiError::Conflict("Email already in use".to_string()),
            other => other.into(),
        })?;

        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("User not found".to_string()),
            other => other.into(),
        })
    }

    /// Grants the admin flag and switches the account type to ADMIN.
    pub async fn promote_to_admin(&self, id: &str) -> Result<User, ApiError> {
        let mut user = self.get(id).await?;
        user.is_admin = true;
        user.account_type = AccountType::Admin;
        user.updated_at = Utc::now();
        self.store.update(&user).await?;
        Ok(user)
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let mut user = self
            .store
            .find_by_verification_token(token)
            .await?
            .ok_or_else(|| ApiError::NotFound("Invalid verification token".to_string()))?;

        user.email_verified = true;
        user.verification_token = None;
        user.updated_at = Utc::now();
        self.store.update(&user).await?;
        Ok(())
    }

    /// Issues a reset token valid for one hour. Delivery is the caller's
    /// concern.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let mut user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        user.reset_password_token = Some(Uuid::new_v4().to_string());
        user.reset_password_expires = Some(Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS));
        user.updated_at = Utc::now();
        self.store.update(&user).await?;
        Ok(())
    }

    /// Consumes an unexpired reset token: re-hashes the password and clears
    /// the token and its expiry in the same write. An expired token is also
    /// cleared on presentation; it never lingers on the row.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let Some(mut user) = self.store.find_by_reset_token(token).await? else {
            return Err(ApiError::NotFound(
                "Invalid or expired reset token".to_string(),
            ));
        };

        let expired = !user
            .reset_password_expires
            .is_some_and(|expires| expires > Utc::now());
        if expired {
            user.reset_password_token = None;
            user.reset_password_expires = None;
            user.updated_at = Utc::now();
            self.store.update(&user).await?;
            return Err(ApiError::NotFound(
                "Invalid or expired reset token".to_string(),
            ));
        }

        user.password_hash = hashing::hash_password(new_password).map_err(|e| {
            tracing::error!("password hashing failed: {e}");
            ApiError::Internal
        })?;
        user.reset_password_token = None;
        user.reset_password_expires = None;
        user.updated_at = Utc::now();
        self.store.update(&user).await?;
        Ok(())
    }
}
