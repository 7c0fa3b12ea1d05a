//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GeneraListError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_skill_config(&settings.skill)?;
    validate_server_config(&settings.server)?;
    validate_logging_config(&settings.logging)?;

    // Backends that are not selected are never connected to
    if settings.storage.backend == StorageBackend::PostgresRedis {
        validate_database_config(&settings.database)?;
        validate_redis_config(&settings.redis)?;
    }

    Ok(())
}

/// Validate skill configuration
fn validate_skill_config(config: &super::SkillConfig) -> Result<()> {
    if config.application_id.trim().is_empty() {
        return Err(GeneraListError::Config(
            "Skill application id is required".to_string()
        ));
    }

    if config.card_title.trim().is_empty() {
        return Err(GeneraListError::Config(
            "Card title must not be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate HTTP listener configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(GeneraListError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(GeneraListError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GeneraListError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(GeneraListError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GeneraListError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GeneraListError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GeneraListError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GeneraListError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
