//! Interface language model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::PolskiBuddyError;

/// Languages the bot can talk in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Pl,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ru, Language::Pl];

    /// ISO 639-1 code, also the translation file stem
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Pl => "pl",
        }
    }

    /// Label shown on the language chooser, in the language itself
    pub fn native_label(&self) -> &'static str {
        match self {
            Language::Ru => "Русский 🇷🇺",
            Language::Pl => "Polski 🇵🇱",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PolskiBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "pl" => Ok(Language::Pl),
            other => Err(PolskiBuddyError::UnsupportedLanguage(other.to_string())),
        }
    }
}
