use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use tracing::instrument;

use crate::middleware::auth::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::state::AppState;
use crate::utils::errors::ApiError;
use crate::utils::response::{ApiResponse, ErrorResponse, MessageResponse};
use crate::validator::ValidatedJson;

use super::model::{AdminLoginData, CredentialsDto, Role, UserLoginData};
use super::service::AccountsService;

/// Attach both auth cookies with the options the SPA expects.
fn set_auth_cookies(jar: CookieJar, access_token: &str, refresh_token: &str) -> CookieJar {
    let access = Cookie::build((ACCESS_TOKEN_COOKIE, access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .build();
    let refresh = Cookie::build((REFRESH_TOKEN_COOKIE, refresh_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .build();

    jar.add(access).add(refresh)
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/users/signup",
    request_body = CredentialsDto,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn user_signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CredentialsDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    AccountsService::register(&state.store, Role::User, dto, &state.auth_config).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message_only(
            StatusCode::CREATED,
            "User created successfully",
        )),
    ))
}

/// Sign in as a user and receive tokens
#[utoipa::path(
    post,
    path = "/users/signin",
    request_body = CredentialsDto,
    responses(
        (status = 200, description = "User logged in successfully", body = ApiResponse<UserLoginData>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn user_signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<CredentialsDto>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<UserLoginData>>), ApiError> {
    let data = AccountsService::login_user(&state.store, dto, &state.auth_config).await?;
    let jar = set_auth_cookies(jar, &data.access_token, &data.refresh_token);

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::new(
            StatusCode::OK,
            data,
            "User logged in successfully",
        )),
    ))
}

/// Register a new admin account
#[utoipa::path(
    post,
    path = "/admin/signup",
    request_body = CredentialsDto,
    responses(
        (status = 201, description = "Admin created successfully", body = MessageResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 409, description = "Admin with the username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn admin_signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CredentialsDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    AccountsService::register(&state.store, Role::Admin, dto, &state.auth_config).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message_only(
            StatusCode::CREATED,
            "Admin created successfully",
        )),
    ))
}

/// Sign in as an admin and receive tokens
#[utoipa::path(
    post,
    path = "/admin/signin",
    request_body = CredentialsDto,
    responses(
        (status = 200, description = "Admin logged in successfully", body = ApiResponse<AdminLoginData>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn admin_signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<CredentialsDto>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<AdminLoginData>>), ApiError> {
    let data = AccountsService::login_admin(&state.store, dto, &state.auth_config).await?;
    let jar = set_auth_cookies(jar, &data.access_token, &data.refresh_token);

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::new(
            StatusCode::OK,
            data,
            "Admin logged in successfully",
        )),
    ))
}
