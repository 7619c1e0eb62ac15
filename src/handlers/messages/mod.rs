//! Message handlers module
//!
//! Turns plain messages into router events and handles reply-keyboard menu
//! presses outside of a submission.

use teloxide::types::Message;
use tracing::debug;
use crate::utils::errors::{PolskiBuddyError, Result};
use crate::services::ServiceFactory;
use crate::i18n::MenuAction;
use crate::models::ImageRef;
use super::router::{EventKind, InboundEvent, Router};

/// Teloxide endpoint for non-command messages
pub async fn handle_message(msg: Message, router: Router) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        PolskiBuddyError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;

    if !msg.chat.id.is_user() {
        debug!(user_id = user_id, chat_id = ?msg.chat.id, "Ignoring message outside a private chat");
        return Ok(());
    }

    let event = InboundEvent {
        sender_id: user_id,
        kind: event_kind(&msg),
    };
    router.dispatch(event).await?;
    Ok(())
}

/// Classify a message; photos carry the file id of their largest size
pub fn event_kind(msg: &Message) -> EventKind {
    if let Some(sizes) = msg.photo() {
        if let Some(largest) = sizes.last() {
            return EventKind::Image(ImageRef::new(largest.file.id.clone()));
        }
    }

    match msg.text() {
        Some(text) => EventKind::Text(text.to_string()),
        None => EventKind::Other,
    }
}

/// Handle text outside a submission: a menu button or a stray message
pub async fn handle_menu_text(services: &ServiceFactory, user_id: i64, text: &str) -> Result<()> {
    let lang = services.session_service.language_for(user_id).await?;

    let Some(action) = services.menu.resolve(lang, text) else {
        debug!(user_id = user_id, "Text does not match any menu button");
        let hint = services.i18n.t("messages.use_menu", lang, None);
        return services.messenger.send_text(user_id, &hint, None).await;
    };

    debug!(user_id = user_id, action = ?action, "Menu action selected");
    match action {
        MenuAction::LearnPolish => {
            let text = services.i18n.t("texts.learn_polish", lang, None);
            services.messenger.send_text(user_id, &text, None).await
        }
        MenuAction::About => {
            let text = services.i18n.t("texts.about", lang, None);
            services.messenger.send_text(user_id, &text, None).await
        }
        MenuAction::Announcements => {
            let text = services.i18n.t("texts.announcements", lang, None);
            services.messenger.send_text(user_id, &text, None).await
        }
        MenuAction::Forum => {
            let is_admin = services.auth_service.is_admin(user_id);
            let title = services.i18n.t("forum.title", lang, None);
            services
                .messenger
                .send_text(user_id, &title, Some(services.menu.forum_menu(lang, is_admin)))
                .await
        }
        MenuAction::ProposePost => {
            services.submission_service.begin(user_id).await?;
            Ok(())
        }
        MenuAction::ShowForum => {
            services.moderation_service.list_published(user_id).await?;
            Ok(())
        }
        MenuAction::ViewPending => {
            services.moderation_service.list_pending(user_id).await?;
            Ok(())
        }
    }
}
