//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

use teloxide::{prelude::*, types::CallbackQuery};
use tracing::{debug, info, warn};
use crate::utils::errors::Result;
use crate::utils::helpers::split_callback_data;
use crate::services::{ModerationOutcome, ServiceFactory};
use crate::models::{Language, PostId};
use crate::handlers::commands::{admin, start};
use super::router::{EventKind, InboundEvent, Router};

/// Parsed inline button payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// `lang:<code>`; the code is kept raw so unsupported ones can be answered
    Language(String),
    Approve(PostId),
    Reject(PostId),
    /// `forum_show`
    ShowForum,
    /// `admin:pending`
    ReviewPending,
    Unknown(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Self {
        let parse_id = |argument: Option<&str>| argument.and_then(|id| id.parse::<u64>().ok()).map(PostId);

        match split_callback_data(data) {
            ("lang", Some(code)) => CallbackAction::Language(code.to_string()),
            ("approve", argument) => parse_id(argument)
                .map(CallbackAction::Approve)
                .unwrap_or_else(|| CallbackAction::Unknown(data.to_string())),
            ("reject", argument) => parse_id(argument)
                .map(CallbackAction::Reject)
                .unwrap_or_else(|| CallbackAction::Unknown(data.to_string())),
            ("forum_show", None) => CallbackAction::ShowForum,
            ("admin", Some("pending")) => CallbackAction::ReviewPending,
            _ => CallbackAction::Unknown(data.to_string()),
        }
    }
}

/// Teloxide endpoint for callback queries
///
/// The query is always answered so the client stops its spinner; a notice
/// from the router is shown as an alert.
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, router: Router) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let message = query
        .message
        .as_ref()
        .map(|m| (m.chat().id.0, m.id().0));

    let Some(data) = query.data.clone() else {
        debug!(user_id = user_id, "Callback query without data");
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    let event = InboundEvent {
        sender_id: user_id,
        kind: EventKind::Callback { data, message },
    };
    let notice = router.dispatch(event).await;

    let mut answer = bot.answer_callback_query(query.id.clone());
    if let Ok(Some(text)) = &notice {
        answer = answer.text(text.clone()).show_alert(true);
    }
    if let Err(e) = answer.await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    notice.map(|_| ())
}

/// Run a parsed callback action, returning the alert text if any
pub async fn run(
    services: &ServiceFactory,
    user_id: i64,
    action: CallbackAction,
    message: Option<(i64, i32)>,
) -> Result<Option<String>> {
    debug!(user_id = user_id, action = ?action, "Routing callback");

    match action {
        CallbackAction::Language(code) => match code.parse::<Language>() {
            Ok(language) => {
                start::handle_language_choice(services, user_id, language, message).await?;
                Ok(None)
            }
            Err(_) => {
                warn!(user_id = user_id, code = %code, "Unsupported language requested");
                let lang = services.session_service.language_for(user_id).await?;
                Ok(Some(services.i18n.t("errors.unsupported_language", lang, None)))
            }
        },
        CallbackAction::Approve(post_id) => {
            let outcome = services.moderation_service.approve(user_id, post_id).await?;
            moderation_notice(services, user_id, outcome).await
        }
        CallbackAction::Reject(post_id) => {
            let outcome = services.moderation_service.reject(user_id, post_id).await?;
            moderation_notice(services, user_id, outcome).await
        }
        CallbackAction::ShowForum => {
            services.moderation_service.list_published(user_id).await?;
            Ok(None)
        }
        CallbackAction::ReviewPending => {
            admin::handle_review_pending(services, user_id).await?;
            Ok(None)
        }
        CallbackAction::Unknown(data) => {
            warn!(user_id = user_id, callback_data = %data, "Unknown callback action");
            Ok(None)
        }
    }
}

async fn moderation_notice(
    services: &ServiceFactory,
    user_id: i64,
    outcome: ModerationOutcome,
) -> Result<Option<String>> {
    match outcome {
        ModerationOutcome::NotFound => {
            let lang = services.session_service.language_for(user_id).await?;
            Ok(Some(services.i18n.t("moderation.not_found", lang, None)))
        }
        ModerationOutcome::Approved(post) | ModerationOutcome::Rejected(post) => {
            info!(user_id = user_id, post_id = %post.id, "Moderation decision applied");
            Ok(None)
        }
    }
}
