use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::{ActivityError, RemoteOperation};

/// Errors that can occur when talking to the GitHub GraphQL API
#[derive(Error, Debug)]
pub enum GithubApiError {
    /// Missing or invalid token (HTTP 401)
    #[error("Invalid token - authentication failed")]
    Unauthorized,

    /// Forbidden - permission denied or secondary rate limit (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from GitHub (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// The queried login does not resolve to a user
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// GraphQL-level errors returned alongside a 200
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Response had neither data nor errors
    #[error("Empty response body")]
    EmptyResponse,

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown or unexpected status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl GithubApiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            s if s.is_server_error() => Self::ServerError(s, body),
            s => Self::UnknownError(s, body),
        }
    }

    /// Returns true if this error is transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimitExceeded | Self::ServerError(_, _) => true,
            Self::NetworkError(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// Translate into the core error, tagged with subject and operation
    pub fn into_activity_error(self, subject: &str, operation: RemoteOperation) -> ActivityError {
        match self {
            Self::UserNotFound(login) => ActivityError::SubjectNotFound(login),
            Self::NetworkError(err) if err.is_timeout() => ActivityError::Timeout {
                subject: subject.to_string(),
                operation,
            },
            other => ActivityError::remote(subject, operation, other.to_string()),
        }
    }
}
