//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Environment prefix for layered settings, e.g. `POLSKIBUDDY_BOT__ADMIN_ID`
pub const ENV_PREFIX: &str = "POLSKIBUDDY";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub forum: ForumConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub admin_id: i64,
}

/// Forum moderation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForumConfig {
    pub max_images: usize,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Plain `BOT_TOKEN` and `ADMIN_ID` variables take precedence so existing
    /// deployments keep working with their `.env` files.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("bot.token", std::env::var("BOT_TOKEN").ok())?
            .set_override_option("bot.admin_id", std::env::var("ADMIN_ID").ok())?
            .build()?
            .try_deserialize()
    }

    /// Load settings from a TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("bot.token", defaults.bot.token)?
            .set_default("bot.admin_id", defaults.bot.admin_id)?
            .set_default("forum.max_images", defaults.forum.max_images as u64)?
            .set_default("i18n.default_language", defaults.i18n.default_language)?
            .set_default("i18n.supported_languages", defaults.i18n.supported_languages)?
            .set_default("i18n.translations_dir", defaults.i18n.translations_dir)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PolskiBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_id: 0,
            },
            forum: ForumConfig {
                max_images: 10,
            },
            i18n: I18nConfig {
                default_language: "ru".to_string(),
                supported_languages: vec!["ru".to_string(), "pl".to_string()],
                translations_dir: "translations".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}
