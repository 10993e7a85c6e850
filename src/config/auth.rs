use std::env;

/// Secrets and lifetimes for the two token classes, plus the bcrypt cost.
///
/// Access and refresh tokens are signed with independent secrets so that a
/// token of one class never verifies as the other.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub access_secret: String,
    pub access_expiry: i64,
    pub refresh_secret: String,
    pub refresh_expiry: i64,
    pub hash_cost: u32,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| "access-secret-change-in-production".to_string()),
            access_expiry: env::var("ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_secret: env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or_else(|_| "refresh-secret-change-in-production".to_string()),
            refresh_expiry: env::var("REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
            hash_cost: env::var("HASH_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        }
    }
}
