//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use uuid::Uuid;

/// Separator between the action and argument parts of callback data
pub const CALLBACK_SEPARATOR: char = ':';

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Check that text carries something besides whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Build callback data in `action:argument` form
pub fn callback_data(action: &str, argument: impl std::fmt::Display) -> String {
    format!("{}{}{}", action, CALLBACK_SEPARATOR, argument)
}

/// Split callback data into action and optional argument
pub fn split_callback_data(data: &str) -> (&str, Option<&str>) {
    match data.split_once(CALLBACK_SEPARATOR) {
        Some((action, argument)) => (action, Some(argument)),
        None => (data, None),
    }
}
