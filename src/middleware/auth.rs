use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::modules::accounts::model::Role;
use crate::state::AppState;
use crate::utils::errors::ApiError;
use crate::utils::jwt::verify_access_token;

/// Cookie carrying the access token, set on sign-in.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie carrying the refresh token, set on sign-in.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// The authenticated caller attached to a request once token checks pass.
///
/// Carries only the identity fields; the password hash and refresh token
/// never leave the store layer.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal {
    pub id: Uuid,
    pub username: String,
}

/// Extractor that validates the access token and loads the user account.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentPrincipal);

/// Extractor that validates the access token and loads the admin account.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub CurrentPrincipal);

/// Pull the access token from the `accessToken` cookie, falling back to the
/// `Authorization: Bearer` header.
fn extract_token(parts: &Parts) -> Result<String, ApiError> {
    if let Some(cookie) = CookieJar::from_headers(&parts.headers).get(ACCESS_TOKEN_COOKIE) {
        return Ok(cookie.value().to_string());
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized request".to_string()))
}

async fn authenticate(
    parts: &Parts,
    state: &AppState,
    role: Role,
) -> Result<CurrentPrincipal, ApiError> {
    let token = extract_token(parts)?;
    let claims = verify_access_token(&token, &state.auth_config)?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid access token".to_string()))?;

    let principal = state
        .store
        .find_principal_by_id(role, id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid access token".to_string()))?;

    Ok(CurrentPrincipal {
        id: principal.id,
        username: principal.username,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(parts, state, Role::User).await?;
        Ok(AuthUser(principal))
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(parts, state, Role::Admin).await?;
        Ok(AuthAdmin(principal))
    }
}
