use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Every failure a handler can produce, mapped onto the API's error kinds.
///
/// All variants render as the same envelope the success path uses, minus
/// `data`: `{"statusCode": N, "message": "...", "success": false}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request is malformed or fails validation. Client-correctable.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing, malformed, or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The operation would violate a uniqueness rule.
    #[error("{0}")]
    Conflict(String),

    /// The asset-hosting collaborator did not return a usable URL.
    #[error("{0}")]
    Upload(String),

    /// Anything unexpected. The cause is logged, never sent to the client.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upload(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!(error = ?err, "Internal server error");
        }

        let status = self.status();
        let body = Json(json!({
            "statusCode": status.as_u16(),
            "message": self.to_string(),
            "success": false,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => Self::Conflict(msg),
            StoreError::Backend(err) => Self::Internal(err),
        }
    }
}
