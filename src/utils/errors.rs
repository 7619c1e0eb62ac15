//! Error handling for PolskiBuddy
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for PolskiBuddy application
#[derive(Error, Debug)]
pub enum PolskiBuddyError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Message delivery failed: {0}")]
    Delivery(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for PolskiBuddy operations
pub type Result<T> = std::result::Result<T, PolskiBuddyError>;

impl PolskiBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            PolskiBuddyError::Telegram(_) => true,
            PolskiBuddyError::Config(_) => false,
            PolskiBuddyError::ConfigLoad(_) => false,
            PolskiBuddyError::PermissionDenied(_) => false,
            PolskiBuddyError::UnsupportedLanguage(_) => false,
            PolskiBuddyError::Delivery(_) => true,
            PolskiBuddyError::Serialization(_) => false,
            PolskiBuddyError::Io(_) => true,
            PolskiBuddyError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PolskiBuddyError::Config(_) => ErrorSeverity::Critical,
            PolskiBuddyError::ConfigLoad(_) => ErrorSeverity::Critical,
            PolskiBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            PolskiBuddyError::Delivery(_) => ErrorSeverity::Warning,
            PolskiBuddyError::UnsupportedLanguage(_) => ErrorSeverity::Info,
            PolskiBuddyError::InvalidInput(_) => ErrorSeverity::Info,
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
