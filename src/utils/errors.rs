//! Error handling for GeneraList
//!
//! This module defines the main error type used throughout the skill backend.
//! User-level mistakes (wrong mode, missing slot, unknown list) are not errors
//! here: the state machine answers them with a corrective reply. What ends up
//! in `GeneraListError` is either a backend failure, which is fatal for the
//! turn, or a protocol violation, which is fatal for the request.

use thiserror::Error;

/// Main error type for GeneraList application
#[derive(Error, Debug)]
pub enum GeneraListError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Request is for application {actual}, expected {expected}")]
    InvalidApplication { expected: String, actual: String },

    #[error("Unknown intent: {0}")]
    UnknownIntent(String),

    #[error("Unsupported request type: {0}")]
    UnsupportedRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for GeneraList operations
pub type Result<T> = std::result::Result<T, GeneraListError>;

impl From<config::ConfigError> for GeneraListError {
    fn from(err: config::ConfigError) -> Self {
        GeneraListError::Config(err.to_string())
    }
}

impl GeneraListError {
    /// Failures of the list or session backend. These end the turn with a
    /// generic apology instead of escaping the dispatcher.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            GeneraListError::Database(_)
                | GeneraListError::Redis(_)
                | GeneraListError::Serialization(_)
                | GeneraListError::InvalidRecord(_)
                | GeneraListError::StoreUnavailable(_)
        )
    }

    /// Malformed or foreign requests. No response body is guaranteed.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            GeneraListError::InvalidApplication { .. }
                | GeneraListError::UnknownIntent(_)
                | GeneraListError::UnsupportedRequest(_)
                | GeneraListError::InvalidInput(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GeneraListError::Database(_) => ErrorSeverity::Critical,
            GeneraListError::Migration(_) => ErrorSeverity::Critical,
            GeneraListError::Config(_) => ErrorSeverity::Critical,
            GeneraListError::InvalidApplication { .. } => ErrorSeverity::Warning,
            GeneraListError::UnknownIntent(_) => ErrorSeverity::Warning,
            GeneraListError::UnsupportedRequest(_) => ErrorSeverity::Warning,
            GeneraListError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
