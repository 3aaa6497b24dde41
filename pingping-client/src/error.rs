//! Error types for API calls.

use thiserror::Error;

/// Errors that can occur when talking to the web API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a status outside the success range.
    #[error("Failure while calling the API with {method} for \"{path}\": status {status}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    /// HTTP request failed.
    #[error("Failure while calling the API with {method} for \"{path}\": {message}")]
    Http {
        method: String,
        path: String,
        message: String,
    },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Connection failed.
    #[error("Failure while calling the API with {method} for \"{path}\": connection failed: {message}")]
    Connection {
        method: String,
        path: String,
        message: String,
    },

    /// Timeout waiting for response.
    #[error("Failure while calling the API with {method} for \"{path}\": request timed out")]
    Timeout { method: String, path: String },

    /// The client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failing call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a transport failure of the call `method path`.
    pub fn transport(method: &reqwest::Method, path: &str, err: reqwest::Error) -> Self {
        let method = method.to_string();
        let path = path.to_string();
        if err.is_timeout() {
            ApiError::Timeout { method, path }
        } else if err.is_connect() {
            ApiError::Connection {
                method,
                path,
                message: err.to_string(),
            }
        } else {
            ApiError::Http {
                method,
                path,
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
