//! Centralized error types for curbdesk.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::ApiError;
use crate::table::TableError;

/// The main application error type.
///
/// Aggregates every error that can reach the UI, keeping the underlying
/// error for logs while offering a plain message for display.
#[derive(Debug, Error)]
pub enum AppError {
    /// Admin server errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Table loading or sorting errors.
    #[error("{0}")]
    Table(#[from] TableError),
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => match e {
                ApiError::Forbidden(_) => {
                    "Access denied. This account cannot use the admin pages.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found on the server.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => "Server error. Please try again later.".to_string(),
                ApiError::Network(_) => {
                    "Connection failed. Please check the server URL and your network.".to_string()
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the server. Please try again.".to_string()
                }
                ApiError::Rejected(msg) => format!("The server rejected the request: {}", msg),
                ApiError::Navigation { url, .. } => format!("Could not open {}", url),
            },
            AppError::Table(e) => match e {
                TableError::ColumnOutOfRange { column, .. } => {
                    format!("Column {} does not exist.", column + 1)
                }
                TableError::CellOutOfRange { column, .. } => {
                    format!("Some rows have no value in column {}.", column + 1)
                }
                TableError::Read(_) => {
                    "Could not read the table file. Please check the path.".to_string()
                }
                TableError::Parse(_) => "The table data is not in the expected format.".to_string(),
            },
        }
    }

    /// Check if this error should be shown in a blocking dialog.
    ///
    /// Critical errors stop the current workflow; everything else is shown
    /// as a toast notification.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Table(TableError::Read(_) | TableError::Parse(_))
                | AppError::Api(ApiError::Forbidden(_))
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Api(ApiError::Network(_)) => {
                Some("Check that the admin server is running, or pass --server.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and press 'R' to reload."),
            AppError::Table(TableError::Read(_)) => Some("Pass a readable JSON file with --table."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_user_message() {
        let err = AppError::Api(ApiError::Rejected("Issue saving route".to_string()));
        assert_eq!(
            err.user_message(),
            "The server rejected the request: Issue saving route"
        );
        assert!(!err.is_critical());
    }

    #[test]
    fn test_table_error_user_message_is_one_based() {
        let err = AppError::Table(TableError::ColumnOutOfRange {
            column: 4,
            columns: 3,
        });
        assert_eq!(err.user_message(), "Column 5 does not exist.");
        assert!(!err.is_critical());
    }

    #[test]
    fn test_table_parse_error_is_critical() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(TableError::Parse(parse));
        assert!(err.is_critical());
    }

    #[test]
    fn test_invalid_response_is_a_toast() {
        let err = AppError::Api(ApiError::InvalidResponse("not JSON".to_string()));
        assert!(!err.is_critical());
        assert_eq!(err.suggested_action(), None);
        assert_eq!(
            err.user_message(),
            "Unexpected response from the server. Please try again."
        );
    }
}
