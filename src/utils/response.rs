use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// The uniform success envelope every endpoint returns.
///
/// `success` is derived from the status code so the two can never disagree.
/// `data` is omitted from the JSON entirely for confirmation-only responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: Some(data),
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }
}

impl ApiResponse<()> {
    /// Confirmation envelope with no `data` field.
    pub fn message_only(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: None,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }
}

/// Confirmation-only envelope shape, as documented in the OpenAPI spec.
/// Actual responses are built with [`ApiResponse::message_only`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
}

/// The error envelope, as documented in the OpenAPI spec. Actual error
/// bodies are produced by [`crate::utils::errors::ApiError`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
}
