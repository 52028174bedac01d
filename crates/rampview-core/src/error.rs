//! Error types for rampview-core
//!
//! This module provides error handling for the loaders and the view
//! coordinator, including error codes, detailed messages, and suggestions.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use std::io;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend request failed
    BackendError,
    /// Employee not found
    EmployeeNotFound,
    /// Empty or sentinel employee id where a real one was required
    InvalidEmployeeId,
    /// Page cursor beyond the end of the data
    InvalidCursor,
    /// Data file could not be decoded
    DataLoadError,
    /// IO error
    IoError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::BackendError => write!(f, "BACKEND_ERROR"),
            ErrorCode::EmployeeNotFound => write!(f, "EMPLOYEE_NOT_FOUND"),
            ErrorCode::InvalidEmployeeId => write!(f, "INVALID_EMPLOYEE_ID"),
            ErrorCode::InvalidCursor => write!(f, "INVALID_CURSOR"),
            ErrorCode::DataLoadError => write!(f, "DATA_LOAD_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl ErrorSeverity {
    /// Log level a failure of this severity is reported at
    pub fn log_level(self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Main error type for rampview-core
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Backend request failed: {message}")]
    Backend { message: String },

    #[error("Employee not found: {id}")]
    EmployeeNotFound { id: String },

    #[error("Employee id cannot be empty")]
    InvalidEmployeeId,

    #[error("Invalid page cursor: {cursor}")]
    InvalidCursor { cursor: usize },

    #[error("Failed to load data: {message}")]
    DataLoad { message: String },

    #[error("IO error occurred")]
    IoError,

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Backend { .. } => ErrorCode::BackendError,
            CoreError::EmployeeNotFound { .. } => ErrorCode::EmployeeNotFound,
            CoreError::InvalidEmployeeId => ErrorCode::InvalidEmployeeId,
            CoreError::InvalidCursor { .. } => ErrorCode::InvalidCursor,
            CoreError::DataLoad { .. } => ErrorCode::DataLoadError,
            CoreError::IoError => ErrorCode::IoError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Backend { .. } => ErrorSeverity::Error,
            CoreError::EmployeeNotFound { .. } => ErrorSeverity::Info,
            CoreError::InvalidEmployeeId => ErrorSeverity::Warning,
            CoreError::InvalidCursor { .. } => ErrorSeverity::Warning,
            CoreError::DataLoad { .. } => ErrorSeverity::Critical,
            CoreError::IoError => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Backend { message } => {
                details = details.with_detail(serde_json::json!({ "backend_message": message }));
                details = details.with_suggestion(
                    "Retry the action; the list shown is the last one loaded successfully.".to_string()
                );
            }
            CoreError::EmployeeNotFound { id } => {
                details = details.with_suggestion(format!(
                    "Check if the employee '{}' exists in the employee directory.", id
                ));
            }
            CoreError::InvalidCursor { cursor } => {
                details = details.with_detail(serde_json::json!({ "cursor": cursor }));
                details = details.with_suggestion(
                    "Reload the transaction list from the first page.".to_string()
                );
            }
            CoreError::DataLoad { message } => {
                details = details.with_detail(serde_json::json!({ "load_message": message }));
                details = details.with_suggestion(
                    "Check that the data file contains `employees` and `transactions` arrays.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(_error: io::Error) -> Self {
        CoreError::IoError
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::BackendError.to_string(), "BACKEND_ERROR");
        assert_eq!(ErrorCode::EmployeeNotFound.to_string(), "EMPLOYEE_NOT_FOUND");
        assert_eq!(ErrorCode::InvalidCursor.to_string(), "INVALID_CURSOR");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::EmployeeNotFound { id: "emp-9".to_string() };
        assert_eq!(error.code(), ErrorCode::EmployeeNotFound);
        assert_eq!(error.severity(), ErrorSeverity::Info);

        let error = CoreError::Backend { message: "timeout".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.severity().to_string(), "error");
    }

    #[test]
    fn test_severity_log_level() {
        assert_eq!(CoreError::EmployeeNotFound { id: "x".to_string() }.severity().log_level(), log::Level::Info);
        assert_eq!(CoreError::InvalidCursor { cursor: 9 }.severity().log_level(), log::Level::Warn);
        assert_eq!(CoreError::DataLoad { message: "bad".to_string() }.severity().log_level(), log::Level::Error);
    }

    #[test]
    fn test_backend_error_details() {
        let details = CoreError::Backend { message: "timeout".to_string() }.to_details();
        assert_eq!(details.code, ErrorCode::BackendError);
        assert!(details.details.is_some());
        assert_eq!(details.suggestions.len(), 1);
        assert!(details.to_string().starts_with("[BACKEND_ERROR] Backend request failed: timeout"));
    }

    #[test]
    fn test_invalid_employee_message() {
        assert_eq!(CoreError::InvalidEmployeeId.to_string(), "Employee id cannot be empty");
    }
}
