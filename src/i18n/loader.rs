//! Translation loader and i18n management
//!
//! This module provides the core internationalization functionality including
//! translation loading, language fallback, message formatting and pluralization.

use std::collections::HashMap;
use std::path::Path;
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, error, debug};
use crate::utils::errors::{PolskiBuddyError, Result};
use crate::config::I18nConfig;
use crate::models::Language;

const BUNDLED_RU: &str = include_str!("../../translations/ru.json");
const BUNDLED_PL: &str = include_str!("../../translations/pl.json");

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language
    translations: HashMap<Language, Map<String, Value>>,
    /// Default language
    default_language: Language,
    /// Supported languages
    supported_languages: Vec<Language>,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance without any translations loaded
    pub fn new(config: &I18nConfig) -> Result<Self> {
        let default_language = config.default_language.parse::<Language>()?;
        let supported_languages = config
            .supported_languages
            .iter()
            .map(|code| code.parse::<Language>())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            translations: HashMap::new(),
            default_language,
            supported_languages,
        })
    }

    /// Create an instance with the translations compiled into the binary
    pub fn bundled(config: &I18nConfig) -> Result<Self> {
        let mut i18n = Self::new(config)?;
        for lang in i18n.supported_languages.clone() {
            let content = match lang {
                Language::Ru => BUNDLED_RU,
                Language::Pl => BUNDLED_PL,
            };
            i18n.insert_language(lang, content)?;
        }
        Ok(i18n)
    }

    /// Load all translation files from a directory
    ///
    /// A missing or broken file for a secondary language only logs an error;
    /// the default language must load.
    pub async fn load_translations(&mut self, translations_dir: &Path) -> Result<()> {
        let supported_languages = self.supported_languages.clone();
        for lang in supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang.code()));

            if file_path.exists() {
                match self.load_language_file(&file_path, lang).await {
                    Ok(_) => info!("Loaded translations for language: {}", lang),
                    Err(e) => {
                        error!("Failed to load translations for {}: {}", lang, e);
                        if lang == self.default_language {
                            return Err(PolskiBuddyError::Config(
                                format!("Failed to load default language translations: {}", e)
                            ));
                        }
                    }
                }
            } else {
                warn!("Translation file not found: {}", file_path.display());
                if lang == self.default_language {
                    return Err(PolskiBuddyError::Config(
                        format!("Default language translation file not found: {}", file_path.display())
                    ));
                }
            }
        }

        Ok(())
    }

    /// Load a single language file
    async fn load_language_file(&mut self, file_path: &Path, lang: Language) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        self.insert_language(lang, &content)
    }

    fn insert_language(&mut self, lang: Language, content: &str) -> Result<()> {
        let translations: Value = serde_json::from_str(content)?;

        if let Value::Object(map) = translations {
            debug!("Loaded {} translation keys for {}", count_keys(&map), lang);
            self.translations.insert(lang, map);
        } else {
            return Err(PolskiBuddyError::Config(
                format!("Invalid translation file format for {}", lang)
            ));
        }

        Ok(())
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: Language, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);

        match self.get_translation_value(key, effective_lang) {
            Some(translation) => {
                let text = extract_text_from_value(translation);
                format_message(&text, params)
            }
            None => {
                // Fallback to default language if not found
                if effective_lang != self.default_language {
                    match self.get_translation_value(key, self.default_language) {
                        Some(translation) => {
                            let text = extract_text_from_value(translation);
                            format_message(&text, params)
                        }
                        None => {
                            warn!("Translation key '{}' not found in any language", key);
                            key.to_string()
                        }
                    }
                } else {
                    warn!("Translation key '{}' not found in default language", key);
                    key.to_string()
                }
            }
        }
    }

    /// Get a translated message with a single `{name}` parameter
    pub fn t_with(&self, key: &str, lang: Language, name: &str, value: impl ToString) -> String {
        let mut params = TranslationParams::new();
        params.insert(name.to_string(), value.to_string());
        self.t(key, lang, Some(&params))
    }

    /// Get a translated message with pluralization support
    pub fn tp(&self, key: &str, lang: Language, count: i64, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);
        let plural_key = format!("{}.{}", key, plural_form(count, effective_lang));

        let mut final_params = params.cloned().unwrap_or_default();
        final_params.insert("count".to_string(), count.to_string());

        self.t(&plural_key, effective_lang, Some(&final_params))
    }

    /// Look up a string only in the given language, without fallback
    pub fn lookup(&self, key: &str, lang: Language) -> Option<String> {
        self.get_translation_value(key, lang).map(extract_text_from_value)
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, lang: Language) -> bool {
        self.supported_languages.contains(&lang)
    }

    /// Languages that actually have translations loaded
    pub fn loaded_languages(&self) -> Vec<Language> {
        self.supported_languages
            .iter()
            .copied()
            .filter(|lang| self.translations.contains_key(lang))
            .collect()
    }

    /// Get default language
    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Get the effective language (fallback to default if not supported)
    fn get_effective_language(&self, lang: Language) -> Language {
        if self.is_language_supported(lang) && self.translations.contains_key(&lang) {
            lang
        } else {
            self.default_language
        }
    }

    /// Get translation value from nested JSON structure
    fn get_translation_value(&self, key: &str, lang: Language) -> Option<&Value> {
        let translations = self.translations.get(&lang)?;

        // Support nested keys like "moderation.not_found"
        let mut parts = key.split('.');
        let mut current = translations.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }

        Some(current)
    }

    /// Get translation statistics
    pub fn get_stats(&self) -> TranslationStats {
        let mut stats = TranslationStats {
            languages: Vec::new(),
            total_keys: 0,
        };

        for (lang, translations) in &self.translations {
            let key_count = count_keys(translations);
            stats.languages.push(LanguageStats {
                code: lang.code().to_string(),
                key_count,
            });
            if *lang == self.default_language {
                stats.total_keys = key_count;
            }
        }

        stats
    }
}

/// Extract text from JSON value (handle both strings and objects with pluralization)
fn extract_text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => {
            // For pluralization objects, default to "other" or first available key
            if let Some(other) = obj.get("other") {
                extract_text_from_value(other)
            } else if let Some((_, first_value)) = obj.iter().next() {
                extract_text_from_value(first_value)
            } else {
                String::new()
            }
        }
        _ => value.to_string(),
    }
}

/// Format message with parameters
fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
    if let Some(params) = params {
        let mut result = template.to_string();
        for (key, value) in params {
            let placeholder = format!("{{{}}}", key);
            result = result.replace(&placeholder, value);
        }
        result
    } else {
        template.to_string()
    }
}

/// Determine plural form based on language-specific rules
fn plural_form(count: i64, lang: Language) -> &'static str {
    let abs_count = count.abs();
    let last_digit = abs_count % 10;
    let last_two_digits = abs_count % 100;
    let few = (2..=4).contains(&last_digit) && !(12..=14).contains(&last_two_digits);

    match lang {
        Language::Ru => {
            if last_digit == 1 && last_two_digits != 11 {
                "one"
            } else if few {
                "few"
            } else {
                "many"
            }
        }
        Language::Pl => {
            // Polish: only exactly one takes the singular
            if abs_count == 1 {
                "one"
            } else if few {
                "few"
            } else {
                "many"
            }
        }
    }
}

/// Recursively count translation keys
fn count_keys(obj: &Map<String, Value>) -> usize {
    let mut count = 0;
    for value in obj.values() {
        match value {
            Value::Object(nested) => count += count_keys(nested),
            _ => count += 1,
        }
    }
    count
}

/// Translation statistics
#[derive(Debug, Clone)]
pub struct TranslationStats {
    pub languages: Vec<LanguageStats>,
    pub total_keys: usize,
}

/// Language-specific statistics
#[derive(Debug, Clone)]
pub struct LanguageStats {
    pub code: String,
    pub key_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> I18nConfig {
        I18nConfig {
            default_language: "ru".to_string(),
            supported_languages: vec!["ru".to_string(), "pl".to_string()],
            translations_dir: "translations".to_string(),
        }
    }

    #[test]
    fn test_plural_form_russian() {
        assert_eq!(plural_form(1, Language::Ru), "one");
        assert_eq!(plural_form(2, Language::Ru), "few");
        assert_eq!(plural_form(5, Language::Ru), "many");
        assert_eq!(plural_form(11, Language::Ru), "many");
        assert_eq!(plural_form(21, Language::Ru), "one");
        assert_eq!(plural_form(0, Language::Ru), "many");
    }

    #[test]
    fn test_plural_form_polish() {
        assert_eq!(plural_form(1, Language::Pl), "one");
        assert_eq!(plural_form(3, Language::Pl), "few");
        assert_eq!(plural_form(12, Language::Pl), "many");
        assert_eq!(plural_form(21, Language::Pl), "many");
        assert_eq!(plural_form(22, Language::Pl), "few");
    }

    #[test]
    fn test_message_formatting() {
        let mut params = HashMap::new();
        params.insert("count".to_string(), "3".to_string());
        params.insert("limit".to_string(), "10".to_string());

        let result = format_message("Image {count} of {limit}", Some(&params));
        assert_eq!(result, "Image 3 of 10");
    }

    #[test]
    fn test_bundled_translations() {
        let i18n = I18n::bundled(&create_test_config()).unwrap();
        assert_eq!(i18n.t("moderation.not_found", Language::Ru, None), "Пост не найден.");
        assert_eq!(i18n.t("moderation.not_found", Language::Pl, None), "Nie znaleziono posta.");
        assert_eq!(
            i18n.t_with("submission.image_accepted", Language::Pl, "count", 2),
            "Zdjęcie 2 przyjęte."
        );
        assert_eq!(i18n.tp("admin.pending_count", Language::Ru, 5, None), "5 постов на модерации");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let i18n = I18n::bundled(&create_test_config()).unwrap();
        assert_eq!(i18n.t("no.such.key", Language::Pl, None), "no.such.key");
        assert_eq!(i18n.lookup("no.such.key", Language::Pl), None);
    }

    #[test]
    fn test_unsupported_language_falls_back_to_default() {
        let config = I18nConfig {
            default_language: "ru".to_string(),
            supported_languages: vec!["ru".to_string()],
            translations_dir: "translations".to_string(),
        };
        let i18n = I18n::bundled(&config).unwrap();
        assert_eq!(i18n.t("forum.no_posts", Language::Pl, None), "На форуме пока нет постов.");
        assert_eq!(i18n.loaded_languages(), vec![Language::Ru]);
    }

    #[test]
    fn test_bundled_catalogs_share_keys() {
        let i18n = I18n::bundled(&create_test_config()).unwrap();
        let stats = i18n.get_stats();
        let counts: Vec<usize> = stats.languages.iter().map(|l| l.key_count).collect();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], counts[1]);
        assert_eq!(stats.total_keys, counts[0]);
    }

    #[tokio::test]
    async fn test_load_translations_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ru.json"), r#"{"menu": {"title": "Меню"}}"#).unwrap();

        let mut i18n = I18n::new(&create_test_config()).unwrap();
        i18n.load_translations(dir.path()).await.unwrap();

        assert_eq!(i18n.t("menu.title", Language::Ru, None), "Меню");
        // pl.json is missing: falls back to the default language
        assert_eq!(i18n.t("menu.title", Language::Pl, None), "Меню");
    }

    #[tokio::test]
    async fn test_missing_default_language_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pl.json"), "{}").unwrap();

        let mut i18n = I18n::new(&create_test_config()).unwrap();
        assert!(i18n.load_translations(dir.path()).await.is_err());
    }
}
