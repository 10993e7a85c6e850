use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::auth::AuthConfig;
use crate::modules::accounts::model::Claims;
use crate::utils::errors::ApiError;

fn create_token(
    principal_id: Uuid,
    username: &str,
    secret: &str,
    expiry: i64,
) -> Result<String, ApiError> {
    let now = Utc::now().timestamp() as usize;
    let exp = (now as i64 + expiry) as usize;

    let claims = Claims {
        sub: principal_id.to_string(),
        username: username.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
}

/// Short-lived token presented on every authenticated request.
pub fn create_access_token(
    principal_id: Uuid,
    username: &str,
    auth_config: &AuthConfig,
) -> Result<String, ApiError> {
    create_token(
        principal_id,
        username,
        &auth_config.access_secret,
        auth_config.access_expiry,
    )
}

/// Long-lived token persisted on the principal record at login.
pub fn create_refresh_token(
    principal_id: Uuid,
    username: &str,
    auth_config: &AuthConfig,
) -> Result<String, ApiError> {
    create_token(
        principal_id,
        username,
        &auth_config.refresh_secret,
        auth_config.refresh_expiry,
    )
}

pub fn verify_access_token(token: &str, auth_config: &AuthConfig) -> Result<Claims, ApiError> {
    verify_token(token, &auth_config.access_secret)
}

pub fn verify_refresh_token(token: &str, auth_config: &AuthConfig) -> Result<Claims, ApiError> {
    verify_token(token, &auth_config.refresh_secret)
}
