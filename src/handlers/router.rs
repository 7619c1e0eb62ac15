//! Inbound event router
//!
//! Teloxide endpoints turn updates into [`InboundEvent`]s and hand them to the
//! [`Router`]. Everything below this point is platform-neutral, which is what
//! lets the integration tests drive the bot with a recording messenger.

use tracing::{debug, warn};
use crate::models::ImageRef;
use crate::services::ServiceFactory;
use crate::state::SubmissionInput;
use crate::utils::errors::{PolskiBuddyError, Result};
use super::callbacks::{self, CallbackAction};
use super::commands::{self, Command};
use super::messages;

/// What the user sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Text(String),
    Image(ImageRef),
    Command(Command),
    Callback {
        data: String,
        /// Chat and message the pressed button belongs to, when still accessible
        message: Option<(i64, i32)>,
    },
    /// Any other message (sticker, document, voice...)
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub sender_id: i64,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn text(sender_id: i64, text: impl Into<String>) -> Self {
        Self { sender_id, kind: EventKind::Text(text.into()) }
    }

    pub fn image(sender_id: i64, image: impl Into<String>) -> Self {
        Self { sender_id, kind: EventKind::Image(ImageRef::new(image)) }
    }

    pub fn command(sender_id: i64, command: Command) -> Self {
        Self { sender_id, kind: EventKind::Command(command) }
    }

    pub fn callback(sender_id: i64, data: impl Into<String>) -> Self {
        Self {
            sender_id,
            kind: EventKind::Callback { data: data.into(), message: None },
        }
    }

    pub fn is_callback(&self) -> bool {
        matches!(self.kind, EventKind::Callback { .. })
    }
}

/// Routes inbound events to the services
#[derive(Clone)]
pub struct Router {
    services: ServiceFactory,
}

impl Router {
    pub fn new(services: ServiceFactory) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &ServiceFactory {
        &self.services
    }

    /// Handle one event
    ///
    /// Returns the notice to show as a callback alert, if any. Refused admin
    /// actions are answered here: as an alert for callbacks, as a message
    /// otherwise.
    pub async fn dispatch(&self, event: InboundEvent) -> Result<Option<String>> {
        let sender_id = event.sender_id;
        let is_callback = event.is_callback();

        match self.route(event).await {
            Err(PolskiBuddyError::PermissionDenied(reason)) => {
                debug!(user_id = sender_id, reason = %reason, "Admin action refused");
                let lang = self.services.session_service.language_for(sender_id).await?;
                let text = self.services.i18n.t("moderation.access_denied", lang, None);
                if is_callback {
                    Ok(Some(text))
                } else {
                    self.services.messenger.send_text(sender_id, &text, None).await?;
                    Ok(None)
                }
            }
            other => other,
        }
    }

    async fn route(&self, event: InboundEvent) -> Result<Option<String>> {
        let sender_id = event.sender_id;
        let submissions = &self.services.submission_service;

        match event.kind {
            EventKind::Command(command) => {
                commands::run(&self.services, sender_id, command).await?;
                Ok(None)
            }
            EventKind::Callback { data, message } => {
                let action = CallbackAction::parse(&data);
                callbacks::run(&self.services, sender_id, action, message).await
            }
            // An active submission sees text and images before the menu does
            EventKind::Text(text) if submissions.is_active(sender_id).await => {
                submissions.handle_input(sender_id, SubmissionInput::Text(text)).await?;
                Ok(None)
            }
            EventKind::Image(image) if submissions.is_active(sender_id).await => {
                submissions.handle_input(sender_id, SubmissionInput::Image(image)).await?;
                Ok(None)
            }
            EventKind::Other if submissions.is_active(sender_id).await => {
                submissions.handle_input(sender_id, SubmissionInput::Other).await?;
                Ok(None)
            }
            EventKind::Text(text) => {
                messages::handle_menu_text(&self.services, sender_id, &text).await?;
                Ok(None)
            }
            EventKind::Image(_) | EventKind::Other => {
                warn!(user_id = sender_id, "Dropping media outside of a submission");
                Ok(None)
            }
        }
    }
}
