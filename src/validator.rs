use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::ApiError;

/// JSON extractor that deserializes and then runs `validator` rules.
///
/// Body problems (wrong content type, malformed JSON, missing fields) and
/// rule violations all map to 400, with the field messages joined.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(map_rejection)?;

        value
            .validate()
            .map_err(|errors| ApiError::InvalidInput(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn map_rejection(rejection: JsonRejection) -> ApiError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return ApiError::InvalidInput(
            "Missing 'Content-Type: application/json' header".to_string(),
        );
    }

    let body_text = rejection.body_text();
    if let Some(field) = missing_field_name(&body_text) {
        return ApiError::InvalidInput(format!("{} is required", field));
    }
    if body_text.contains("invalid type") {
        return ApiError::InvalidInput("Invalid field type in request".to_string());
    }

    ApiError::InvalidInput("Invalid request body".to_string())
}

/// Pulls the field name out of serde's ``missing field `name` `` message.
fn missing_field_name(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }
    messages.join(", ")
}
