use std::sync::Arc;

use tracing::instrument;

use crate::config::auth::AuthConfig;
use crate::store::{Store, StoreError};
use crate::utils::errors::ApiError;
use crate::utils::jwt::{create_access_token, create_refresh_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    AdminLoginData, CredentialsDto, NewPrincipal, Principal, Role, UserLoginData, UserProfile,
};

pub struct AccountsService;

impl AccountsService {
    /// Usernames are case-insensitive: stored and matched trimmed + lowercased.
    fn normalize_username(username: &str) -> String {
        username.trim().to_lowercase()
    }

    /// Create an account under `role`. The password is hashed as received;
    /// only the username is normalized.
    #[instrument(skip(store, dto, auth_config))]
    pub async fn register(
        store: &Arc<dyn Store>,
        role: Role,
        dto: CredentialsDto,
        auth_config: &AuthConfig,
    ) -> Result<Principal, ApiError> {
        let username = Self::normalize_username(&dto.username);

        if username.is_empty() || dto.password.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Username & Password both are required".to_string(),
            ));
        }

        let password_hash = hash_password(&dto.password, auth_config.hash_cost)?;

        let principal = store
            .insert_principal(
                role,
                NewPrincipal {
                    username,
                    password_hash,
                },
            )
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => ApiError::Conflict(match role {
                    Role::User => "Username already exists".to_string(),
                    Role::Admin => "Admin with the username already exists".to_string(),
                }),
                other => other.into(),
            })?;

        Ok(principal)
    }

    /// Check credentials, issue both tokens, and persist the refresh token.
    ///
    /// Missing account and wrong password produce the same error so the
    /// response never reveals which usernames exist.
    #[instrument(skip(store, dto, auth_config))]
    async fn authenticate(
        store: &Arc<dyn Store>,
        role: Role,
        dto: CredentialsDto,
        auth_config: &AuthConfig,
    ) -> Result<(String, String, Principal), ApiError> {
        let username = Self::normalize_username(&dto.username);

        let principal = store
            .find_principal_by_username(role, &username)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

        if !verify_password(&dto.password, &principal.password_hash)? {
            return Err(ApiError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let access_token = create_access_token(principal.id, &principal.username, auth_config)?;
        let refresh_token = create_refresh_token(principal.id, &principal.username, auth_config)?;

        store
            .set_refresh_token(role, principal.id, &refresh_token)
            .await?;

        Ok((access_token, refresh_token, principal))
    }

    #[instrument(skip(store, dto, auth_config))]
    pub async fn login_user(
        store: &Arc<dyn Store>,
        dto: CredentialsDto,
        auth_config: &AuthConfig,
    ) -> Result<UserLoginData, ApiError> {
        let (access_token, refresh_token, principal) =
            Self::authenticate(store, Role::User, dto, auth_config).await?;

        let enrollments = store.list_enrollments(principal.id).await?;

        Ok(UserLoginData {
            access_token,
            refresh_token,
            user: UserProfile::from_parts(principal, enrollments),
        })
    }

    #[instrument(skip(store, dto, auth_config))]
    pub async fn login_admin(
        store: &Arc<dyn Store>,
        dto: CredentialsDto,
        auth_config: &AuthConfig,
    ) -> Result<AdminLoginData, ApiError> {
        let (access_token, refresh_token, principal) =
            Self::authenticate(store, Role::Admin, dto, auth_config).await?;

        Ok(AdminLoginData {
            access_token,
            refresh_token,
            admin: principal.into(),
        })
    }
}
