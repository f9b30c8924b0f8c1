//! Model-related error types.

use std::time::Duration;
use thiserror::Error;

/// Errors from a generation model call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP error from the API.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// API-level error: the call went through but the backend reported
    /// a failure (e.g. a prediction that did not succeed).
    #[error("API error: {0}")]
    Api(String),

    /// The call did not complete within the allowed time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Rate limited by the API.
    #[error("Rate limited")]
    RateLimited,

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The API answered with something the client could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Client-side configuration error (missing token, bad model id).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization error while building the request.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create an HTTP error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelError::Timeout(Duration::from_secs(30))
        } else if err.is_connect() {
            ModelError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ModelError::http(status.as_u16(), err.to_string())
        } else {
            ModelError::Connection(err.to_string())
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
