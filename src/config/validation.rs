//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{FaqBotError, Result};
use super::{ContentBackend, OperatorBackend, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_storage_config(&settings.storage)?;

    if settings.storage.content_backend == ContentBackend::Postgres {
        validate_database_config(&settings.database)?;
    }

    if settings.storage.operator_backend == OperatorBackend::Redis {
        validate_redis_config(&settings.redis)?;
    }

    validate_session_config(&settings.sessions)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(FaqBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate storage backend selection
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.operator_backend == OperatorBackend::File && config.operators_file.is_empty() {
        return Err(FaqBotError::Config(
            "Operators file path is required for the file backend".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(FaqBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.url)?;
    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(FaqBotError::Config(
            format!("Unsupported database scheme: {}", url.scheme())
        ));
    }

    if config.max_connections == 0 {
        return Err(FaqBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(FaqBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(FaqBotError::Config(
            "Redis URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.url)?;
    if !matches!(url.scheme(), "redis" | "rediss") {
        return Err(FaqBotError::Config(
            format!("Unsupported Redis scheme: {}", url.scheme())
        ));
    }

    Ok(())
}

/// Validate session lifecycle configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.idle_timeout_seconds == 0 {
        return Err(FaqBotError::Config(
            "Session idle timeout must be greater than 0".to_string()
        ));
    }

    if config.cleanup_interval_seconds == 0 {
        return Err(FaqBotError::Config(
            "Session cleanup interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FaqBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FaqBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
