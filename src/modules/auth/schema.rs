use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct TwoFactorSecretResponse {
    pub secret: String,
    #[serde(rename = "otpauthUrl")]
    pub otpauth_url: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyTwoFactorRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TwoFactorEnabledResponse {
    pub message: String,
}
