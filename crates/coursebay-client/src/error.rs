use thiserror::Error;

/// Every failure a client call can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, timeout, or a body that
    /// is not the expected JSON.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    /// The response parsed but did not carry what the call expected.
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

impl ClientError {
    /// The HTTP status of an API-level error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_message_and_status() {
        let err = ClientError::Api {
            status: 409,
            message: "Course already purchased".to_string(),
        };

        assert_eq!(err.to_string(), "Course already purchased (status 409)");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn unexpected_error_has_no_status() {
        let err = ClientError::Unexpected("no data".to_string());
        assert_eq!(err.status(), None);
    }
}
