use chrono::Utc;

use crate::error::ApiError;
use crate::modules::user::interface::UserStore;
use crate::modules::user::model::User;
use crate::services::hashing;
use crate::services::jwt::JwtService;
use crate::services::totp::{TwoFactorEnrollment, TwoFactorManager};

/// Login and two-factor orchestration over the credential store, the hasher,
/// the token issuer and the TOTP manager.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    jwt: &'a JwtService,
    two_factor: &'a TwoFactorManager,
}

impl<'a> AuthService<'a> {
    pub fn new(
        users: &'a dyn UserStore,
        jwt: &'a JwtService,
        two_factor: &'a TwoFactorManager,
    ) -> Self {
        Self {
            users,
            jwt,
            two_factor,
        }
    }

    /// Verifies the password first, then gates on email verification: a
    /// correct password against an unverified account is told to verify,
    /// while a missing account or wrong password is an indistinct `None`.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(None);
        };

        if !hashing::verify_password(password, &user.password_hash) {
            return Ok(None);
        }

        if !user.email_verified {
            return Err(ApiError::Unauthorized(
                "Please verify your email first".to_string(),
            ));
        }

        Ok(Some(user))
    }

    /// Issues a fresh access token from the resolved principal's minimal
    /// claim set.
    pub fn login(&self, user: &User) -> Result<String, ApiError> {
        self.jwt.create_access_token(user).map_err(|e| {
            tracing::error!("access token signing failed: {e}");
            ApiError::Internal
        })
    }

    /// Generates and persists a fresh TOTP secret. Re-enrollment overwrites
    /// the previous secret; only one is ever stored.
    pub async fn generate_two_factor_secret(
        &self,
        user_id: &str,
    ) -> Result<TwoFactorEnrollment, ApiError> {
        let mut user = self.get_user(user_id).await?;

        let enrollment = self.two_factor.generate_secret(&user.email).map_err(|e| {
            tracing::error!("two-factor enrollment failed: {e}");
            ApiError::Internal
        })?;

        user.two_factor_secret = Some(enrollment.secret.clone());
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        Ok(enrollment)
    }

    /// Checks a submitted code against the enrolled secret. No enrolled
    /// secret is a 404, not a failed check.
    pub async fn verify_two_factor_token(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<bool, ApiError> {
        let user = self.get_user(user_id).await?;

        let secret = user.two_factor_secret.as_deref().ok_or_else(|| {
            ApiError::NotFound("Two-factor authentication is not set up".to_string())
        })?;

        Ok(self.two_factor.verify(code, secret))
    }

    /// Flips the enabled flag. Requires a generated secret; idempotent once
    /// enabled.
    pub async fn enable_two_factor(&self, user_id: &str) -> Result<String, ApiError> {
        let mut user = self.get_user(user_id).await?;

        if user.two_factor_secret.is_none() {
            return Err(ApiError::NotFound(
                "Two-factor authentication is not set up".to_string(),
            ));
        }

        if !user.two_factor_enabled {
            user.two_factor_enabled = true;
            user.updated_at = Utc::now();
            self.users.update(&user).await?;
        }

        Ok(format!(
            "Two-factor authentication enabled for your account: {}",
            user.first_name
        ))
    }

    async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
