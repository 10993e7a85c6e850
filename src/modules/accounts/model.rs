use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::enrollments::model::Enrollment;

/// The two account collections. Users and admins are stored separately, so
/// the same username can exist once under each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // principal id
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

/// A stored account, either role. Never serialized; responses expose
/// [`UserProfile`] / [`AdminProfile`], which carry no password hash or
/// refresh token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`crate::store::Store::insert_principal`]. The
/// username arrives already normalized and the password already hashed.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub username: String,
    pub password_hash: String,
}

// Signup and signin request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CredentialsDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A user account as the API returns it, purchases inline.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub purchased_course: Vec<Enrollment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_parts(principal: Principal, enrollments: Vec<Enrollment>) -> Self {
        Self {
            id: principal.id,
            username: principal.username,
            purchased_course: enrollments,
            created_at: principal.created_at,
            updated_at: principal.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Principal> for AdminProfile {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username,
            created_at: principal.created_at,
            updated_at: principal.updated_at,
        }
    }
}

// Sign-in response payloads
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub admin: AdminProfile,
}
