//! Internationalization module
//!
//! This module handles multi-language support for the PolskiBuddy bot.
//! It provides translation loading, message formatting, pluralization and
//! the localized reply-keyboard menus.

pub mod loader;
pub mod menu;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams, TranslationStats, LanguageStats};
pub use menu::{MenuAction, MenuResolver};
