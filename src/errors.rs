//! # Application Error Types
//!
//! Common error types used throughout the Cinescope bot, plus standardized
//! logging helpers so handlers report failures consistently.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Database operation errors
    Database(String),
    /// Catalog or user lookup misses
    NotFound(String),
    /// Malformed callback payloads
    Decode(String),
    /// Telegram transport errors
    Transport(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Database(msg) => write!(f, "[DATABASE] {}", msg),
            AppError::NotFound(msg) => write!(f, "[NOT_FOUND] {}", msg),
            AppError::Decode(msg) => write!(f, "[DECODE] {}", msg),
            AppError::Transport(msg) => write!(f, "[TRANSPORT] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<teloxide::RequestError> for AppError {
    fn from(err: teloxide::RequestError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::{error, warn};

    /// Log database operation errors with contextual information
    pub fn log_database_error(
        error: &impl std::fmt::Display,
        operation: &str,
        user_id: Option<i64>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            user_id = ?user_id,
            "Database operation failed"
        );
    }

    /// Log Telegram send failures; the in-flight response is dropped
    pub fn log_transport_error(error: &impl std::fmt::Display, operation: &str, chat_id: i64) {
        error!(
            error = %error,
            operation = %operation,
            chat_id = %chat_id,
            "Transport operation failed, response dropped"
        );
    }

    /// Log malformed callback payloads; the update degrades to a no-op
    pub fn log_decode_error(error: &impl std::fmt::Display, payload: &str, user_id: Option<i64>) {
        warn!(
            error = %error,
            payload = %payload,
            user_id = ?user_id,
            "Malformed callback payload ignored"
        );
    }

    /// Log internal application errors with component context
    pub fn log_internal_error(
        error: &impl std::fmt::Display,
        component: &str,
        operation: &str,
        user_id: Option<i64>,
    ) {
        error!(
            error = %error,
            component = %component,
            operation = %operation,
            user_id = ?user_id,
            "Internal application error"
        );
    }
}
