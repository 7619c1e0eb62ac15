//! Menu actions and their localized labels
//!
//! Reply-keyboard buttons come back to the bot as plain text. Instead of
//! comparing that text against catalog strings at every branch, each button is
//! a [`MenuAction`] and the label table is built once from the loaded catalog.

use std::collections::HashMap;
use tracing::warn;
use super::I18n;
use crate::models::{Language, Markup};

/// Canonical reply-keyboard actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    LearnPolish,
    About,
    Announcements,
    Forum,
    ProposePost,
    ShowForum,
    ViewPending,
}

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        MenuAction::LearnPolish,
        MenuAction::About,
        MenuAction::Announcements,
        MenuAction::Forum,
        MenuAction::ProposePost,
        MenuAction::ShowForum,
        MenuAction::ViewPending,
    ];

    /// Catalog key of the button label
    pub fn label_key(&self) -> &'static str {
        match self {
            MenuAction::LearnPolish => "menu.learn_polish",
            MenuAction::About => "menu.about",
            MenuAction::Announcements => "menu.announcements",
            MenuAction::Forum => "menu.forum",
            MenuAction::ProposePost => "forum.propose_post",
            MenuAction::ShowForum => "forum.show",
            MenuAction::ViewPending => "forum.view_pending",
        }
    }
}

/// Label table built from the catalog at startup
#[derive(Debug, Clone)]
pub struct MenuResolver {
    labels: HashMap<Language, HashMap<MenuAction, String>>,
    actions: HashMap<Language, HashMap<String, MenuAction>>,
    default_language: Language,
}

impl MenuResolver {
    pub fn new(i18n: &I18n) -> Self {
        let mut labels: HashMap<Language, HashMap<MenuAction, String>> = HashMap::new();
        let mut actions: HashMap<Language, HashMap<String, MenuAction>> = HashMap::new();

        for lang in i18n.loaded_languages() {
            for action in MenuAction::ALL {
                let Some(label) = i18n.lookup(action.label_key(), lang) else {
                    warn!(language = %lang, key = action.label_key(), "Menu label missing from catalog");
                    continue;
                };
                let previous = actions
                    .entry(lang)
                    .or_default()
                    .insert(label.clone(), action);
                if let Some(previous) = previous {
                    warn!(language = %lang, label = %label, ?previous, ?action, "Duplicate menu label");
                }
                labels.entry(lang).or_default().insert(action, label);
            }
        }

        Self {
            labels,
            actions,
            default_language: i18n.default_language(),
        }
    }

    /// Map incoming text to an action
    ///
    /// The user's language wins; labels of other languages are accepted too so
    /// a keyboard left over from a previous language choice keeps working.
    pub fn resolve(&self, lang: Language, text: &str) -> Option<MenuAction> {
        if let Some(action) = self.actions.get(&lang).and_then(|table| table.get(text)) {
            return Some(*action);
        }

        self.actions
            .iter()
            .filter(|(other, _)| **other != lang)
            .find_map(|(_, table)| table.get(text).copied())
    }

    /// Localized label of an action
    pub fn label(&self, lang: Language, action: MenuAction) -> String {
        self.labels
            .get(&lang)
            .or_else(|| self.labels.get(&self.default_language))
            .and_then(|table| table.get(&action))
            .cloned()
            .unwrap_or_else(|| action.label_key().to_string())
    }

    /// Main menu keyboard
    pub fn main_menu(&self, lang: Language) -> Markup {
        self.keyboard(lang, &[
            MenuAction::LearnPolish,
            MenuAction::About,
            MenuAction::Announcements,
            MenuAction::Forum,
        ])
    }

    /// Forum sub-menu keyboard; the moderation entry is only shown to the admin
    pub fn forum_menu(&self, lang: Language, is_admin: bool) -> Markup {
        let mut buttons = vec![MenuAction::ProposePost, MenuAction::ShowForum];
        if is_admin {
            buttons.push(MenuAction::ViewPending);
        }
        self.keyboard(lang, &buttons)
    }

    fn keyboard(&self, lang: Language, buttons: &[MenuAction]) -> Markup {
        Markup::Menu(
            buttons
                .iter()
                .map(|action| vec![self.label(lang, *action)])
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::I18nConfig;

    fn resolver() -> MenuResolver {
        let config = I18nConfig {
            default_language: "ru".to_string(),
            supported_languages: vec!["ru".to_string(), "pl".to_string()],
            translations_dir: "translations".to_string(),
        };
        MenuResolver::new(&I18n::bundled(&config).unwrap())
    }

    #[test]
    fn test_resolve_in_user_language() {
        let menu = resolver();
        assert_eq!(menu.resolve(Language::Ru, "💬 Форум"), Some(MenuAction::Forum));
        assert_eq!(menu.resolve(Language::Pl, "✍️ Zaproponuj post"), Some(MenuAction::ProposePost));
        assert_eq!(menu.resolve(Language::Ru, "hello"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_other_languages() {
        let menu = resolver();
        assert_eq!(menu.resolve(Language::Pl, "📘 О нас"), Some(MenuAction::About));
    }

    #[test]
    fn test_every_action_round_trips_through_its_label() {
        let menu = resolver();
        for lang in Language::ALL {
            for action in MenuAction::ALL {
                let label = menu.label(lang, action);
                assert_eq!(menu.resolve(lang, &label), Some(action), "{:?} {:?}", lang, action);
            }
        }
    }

    #[test]
    fn test_forum_menu_hides_moderation_from_users() {
        let menu = resolver();
        let user = menu.forum_menu(Language::Ru, false);
        let admin = menu.forum_menu(Language::Ru, true);
        assert_eq!(user.labels().len(), 2);
        assert_eq!(admin.labels().len(), 3);
        assert!(admin.labels().contains(&"🕓 На модерации"));
    }
}
