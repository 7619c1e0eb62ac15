//! Start command handler
//!
//! Handles the /start command and the language chooser that follows it

use tracing::{debug, info, warn};
use crate::utils::errors::Result;
use crate::utils::helpers::callback_data;
use crate::utils::logging::log_user_action;
use crate::services::ServiceFactory;
use crate::models::{Control, Language, Markup};

/// Callback action tag of the language buttons
pub const LANGUAGE_ACTION: &str = "lang";

/// Handle /start command - show the language chooser
pub async fn handle_start(services: &ServiceFactory, user_id: i64) -> Result<()> {
    debug!(user_id = user_id, "Processing /start command");

    let lang = services.session_service.language_for(user_id).await?;
    let text = services.i18n.t("start.choose_language", lang, None);
    services
        .messenger
        .send_text(user_id, &text, Some(language_chooser()))
        .await?;

    log_user_action(user_id, "start", None);
    Ok(())
}

/// Inline keyboard with one button per language
pub fn language_chooser() -> Markup {
    Markup::Inline(vec![Language::ALL
        .iter()
        .map(|lang| Control::new(lang.native_label(), callback_data(LANGUAGE_ACTION, lang.code())))
        .collect()])
}

/// Store the chosen language and show the main menu in it
pub async fn handle_language_choice(
    services: &ServiceFactory,
    user_id: i64,
    language: Language,
    chooser_message: Option<(i64, i32)>,
) -> Result<()> {
    services.session_service.set_language(user_id, language).await?;
    info!(user_id = user_id, language = %language, "Language selected");

    if let Some((chat_id, message_id)) = chooser_message {
        if let Err(e) = services.messenger.clear_inline_controls(chat_id, message_id).await {
            warn!(user_id = user_id, error = %e, "Failed to remove language chooser");
        }
    }

    let selected = services.i18n.t("start.language_selected", language, None);
    services.messenger.send_text(user_id, &selected, None).await?;

    let title = services.i18n.t("menu.title", language, None);
    services
        .messenger
        .send_text(user_id, &title, Some(services.menu.main_menu(language)))
        .await?;

    Ok(())
}
