use totp_rs::{Algorithm, Secret, TOTP};

const DIGITS: usize = 6;
const SKEW: u8 = 1;
const STEP_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum TwoFactorError {
    #[error("Invalid two-factor secret: {0}")]
    Secret(String),

    #[error("Invalid enrollment parameters: {0}")]
    Enrollment(String),
}

#[derive(Debug)]
pub struct TwoFactorEnrollment {
    pub secret: String,
    pub otpauth_url: String,
}

/// TOTP enrollment and verification. SHA1, 6 digits, 30 second steps, codes
/// accepted one step either side of now.
pub struct TwoFactorManager {
    issuer: String,
}

impl TwoFactorManager {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    /// Fresh random secret plus the otpauth URI an authenticator app enrolls
    /// from. The secret is returned base32 encoded, which is also the form it
    /// is stored in.
    pub fn generate_secret(
        &self,
        account_label: &str,
    ) -> Result<TwoFactorEnrollment, TwoFactorError> {
        let secret = Secret::generate_secret()
            .to_bytes()
            .map_err(|e| TwoFactorError::Secret(format!("{e:?}")))?;
        let totp = self.build(secret, account_label)?;

        Ok(TwoFactorEnrollment {
            secret: totp.get_secret_base32(),
            otpauth_url: totp.get_url(),
        })
    }

    /// An unusable stored secret counts as a failed verification, never an
    /// error surfaced to the caller.
    pub fn verify(&self, code: &str, secret_base32: &str) -> bool {
        match self.totp_from_base32(secret_base32) {
            Ok(totp) => totp.check_current(code).unwrap_or(false),
            Err(e) => {
                tracing::warn!("two-factor check against unusable secret: {e}");
                false
            }
        }
    }

    fn totp_from_base32(&self, secret_base32: &str) -> Result<TOTP, TwoFactorError> {
        let secret = Secret::Encoded(secret_base32.to_string())
            .to_bytes()
            .map_err(|e| TwoFactorError::Secret(format!("{e:?}")))?;
        // the account label plays no part in code verification
        self.build(secret, "account")
    }

    fn build(&self, secret: Vec<u8>, account_label: &str) -> Result<TOTP, TwoFactorError> {
        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP_SECS,
            secret,
            Some(self.issuer.clone()),
            account_label.to_string(),
        )
        .map_err(|e| TwoFactorError::Enrollment(format!("{e:?}")))
    }
}
