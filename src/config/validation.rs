//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::models::Language;
use crate::utils::errors::{PolskiBuddyError, Result};
use super::Settings;

/// Telegram accepts at most ten photos in one media group
pub const MAX_IMAGES_PER_POST: usize = 10;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_forum_config(&settings.forum)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(PolskiBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_id <= 0 {
        return Err(PolskiBuddyError::Config(
            "Admin ID must be a positive Telegram user ID".to_string()
        ));
    }

    Ok(())
}

/// Validate forum configuration
fn validate_forum_config(config: &super::ForumConfig) -> Result<()> {
    if config.max_images == 0 || config.max_images > MAX_IMAGES_PER_POST {
        return Err(PolskiBuddyError::Config(
            format!("Max images must be between 1 and {}", MAX_IMAGES_PER_POST)
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(PolskiBuddyError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(PolskiBuddyError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(PolskiBuddyError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    for code in &config.supported_languages {
        if code.parse::<Language>().is_err() {
            return Err(PolskiBuddyError::Config(
                format!("Unsupported language in configuration: {}", code)
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PolskiBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PolskiBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
