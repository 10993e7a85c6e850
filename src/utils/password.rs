use anyhow::Context;
use bcrypt::{hash, verify};

use crate::utils::errors::ApiError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    Ok(hash(password, cost).context("Failed to hash password")?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    Ok(verify(password, hash).context("Failed to verify password")?)
}
