//! Platform-neutral reply controls
//!
//! Handlers describe buttons as `(label, action tag)` pairs; the messenger
//! adapter turns them into Telegram keyboards.

use serde::{Deserialize, Serialize};

/// An inline button: label shown to the user, tag sent back as callback data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub label: String,
    pub action: String,
}

impl Control {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Controls attached to an outgoing text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Markup {
    /// Buttons attached to the message, rows of controls
    Inline(Vec<Vec<Control>>),
    /// Persistent reply keyboard, rows of labels sent back as plain text
    Menu(Vec<Vec<String>>),
}

impl Markup {
    /// Every action tag of an inline markup, row by row
    pub fn actions(&self) -> Vec<&str> {
        match self {
            Markup::Inline(rows) => rows
                .iter()
                .flatten()
                .map(|control| control.action.as_str())
                .collect(),
            Markup::Menu(_) => Vec::new(),
        }
    }

    /// Every label, row by row
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Markup::Inline(rows) => rows
                .iter()
                .flatten()
                .map(|control| control.label.as_str())
                .collect(),
            Markup::Menu(rows) => rows.iter().flatten().map(String::as_str).collect(),
        }
    }
}
