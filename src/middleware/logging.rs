//! Logging middleware
//!
//! Logs every inbound update before routing and measures how long handlers
//! take. Message text is only logged at debug level.

use std::time::Instant;
use teloxide::types::{MediaKind, Message, MessageKind, Update, UpdateKind};
use tracing::{debug, error, info, instrument, warn, Span};
use crate::utils::errors::{ErrorSeverity, PolskiBuddyError};

/// Handlers slower than this are reported at warn level
const SLOW_HANDLER_MS: u128 = 1000;

/// Logging middleware for bot interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    pub fn new(log_user_interactions: bool, log_performance: bool) -> Self {
        Self {
            log_user_interactions,
            log_performance,
        }
    }

    /// Log incoming update
    #[instrument(skip(self, update), fields(update_id = update.id.0))]
    pub fn log_update(&self, update: &Update) {
        if !self.log_user_interactions {
            return;
        }

        match &update.kind {
            UpdateKind::Message(message) => self.log_message(message),
            UpdateKind::CallbackQuery(callback) => {
                info!(
                    user_id = callback.from.id.0,
                    callback_data = callback.data.as_deref().unwrap_or("none"),
                    "Callback query received"
                );
            }
            _ => {
                debug!("Other update type received");
            }
        }
    }

    fn log_message(&self, message: &Message) {
        let user_id = message.from.as_ref().map(|user| user.id.0);
        let message_type = message_type(message);

        if let Some(text) = message.text() {
            debug!(user_id = ?user_id, text = %text, "Text message received");
        }

        info!(
            user_id = ?user_id,
            chat_id = message.chat.id.0,
            private = message.chat.is_private(),
            message_type = message_type,
            message_id = message.id.0,
            "Message received"
        );
    }

    /// Log a handler error at the level its severity calls for
    pub fn log_error(&self, error: &PolskiBuddyError, context: &str, user_id: Option<i64>) {
        match error.severity() {
            ErrorSeverity::Info => {
                info!(error = %error, context = context, user_id = user_id, "Handler stopped")
            }
            ErrorSeverity::Warning => {
                warn!(error = %error, context = context, user_id = user_id, recoverable = error.is_recoverable(), "Handler failed")
            }
            severity => {
                error!(error = %error, context = context, user_id = user_id, severity = %severity, "Handler failed")
            }
        }
    }

    /// Start measuring a handler, if performance logging is on
    pub fn track(&self, operation: &str) -> Option<PerformanceTracker> {
        self.log_performance
            .then(|| PerformanceTracker::new(operation.to_string()))
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true)
    }
}

fn message_type(message: &Message) -> &'static str {
    match &message.kind {
        MessageKind::Common(common) => match &common.media_kind {
            MediaKind::Text(_) => "text",
            MediaKind::Photo(_) => "photo",
            MediaKind::Document(_) => "document",
            MediaKind::Sticker(_) => "sticker",
            MediaKind::Voice(_) => "voice",
            MediaKind::Video(_) => "video",
            _ => "other_media",
        },
        _ => "other",
    }
}

/// Measures the duration of one handler call
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("handler", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Log the duration and whether the handler succeeded
    pub fn complete(self, success: bool) {
        let duration_ms = self.start_time.elapsed().as_millis();

        if duration_ms > SLOW_HANDLER_MS {
            warn!(operation = %self.operation, duration_ms = duration_ms, success = success, "Slow handler");
        } else {
            debug!(operation = %self.operation, duration_ms = duration_ms, success = success, "Handler finished");
        }
    }
}
