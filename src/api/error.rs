//! API error types for the admin server client.

use thiserror::Error;

/// Errors that can occur when talking to the admin server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server refused access to the endpoint.
    #[error("Permission denied: you don't have access to {0}")]
    Forbidden(String),

    /// Endpoint not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the server.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Server-side error.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the server.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered but reported that the submission failed.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The URL could not be opened in the browser.
    #[error("Could not open {url}: {reason}")]
    Navigation {
        /// The URL that failed to open.
        url: String,
        /// Why it failed.
        reason: String,
    },
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 | 403 => ApiError::Forbidden(context.to_string()),
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }

    /// Check if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::Network(_)
        )
    }
}
