//! Error handling for FaqBuddy
//!
//! This module defines the main error type used throughout the application.
//! Expected conversational failures (empty input, duplicate names, stale
//! selections) are not errors: they are result tags returned by the stores
//! and recovered inside the dialogue. Everything here is infrastructure.

use thiserror::Error;

/// Main error type for FaqBuddy application
#[derive(Error, Debug)]
pub enum FaqBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for FaqBuddy operations
pub type Result<T> = std::result::Result<T, FaqBotError>;

impl FaqBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            FaqBotError::Database(_) => true,
            FaqBotError::Migration(_) => false,
            FaqBotError::Telegram(_) => true,
            FaqBotError::Redis(_) => true,
            FaqBotError::Serialization(_) => false,
            FaqBotError::Io(_) => true,
            FaqBotError::UrlParse(_) => false,
            FaqBotError::Config(_) => false,
            FaqBotError::Storage(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FaqBotError::Migration(_) => ErrorSeverity::Critical,
            FaqBotError::Config(_) => ErrorSeverity::Critical,
            FaqBotError::UrlParse(_) => ErrorSeverity::Critical,
            FaqBotError::Telegram(_) => ErrorSeverity::Warning,
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
