//! Recording messenger double
//!
//! Captures every outbound message instead of talking to Telegram. Chosen
//! recipients can be made unreachable to exercise delivery failures.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use polski_buddy::models::{ImageRef, Markup};
use polski_buddy::services::Messenger;
use polski_buddy::{PolskiBuddyError, Result};

/// One captured outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        recipient_id: i64,
        text: String,
        markup: Option<Markup>,
    },
    Images {
        recipient_id: i64,
        images: Vec<ImageRef>,
    },
    ClearControls {
        chat_id: i64,
        message_id: i32,
    },
}

impl Sent {
    pub fn recipient(&self) -> i64 {
        match self {
            Sent::Text { recipient_id, .. } | Sent::Images { recipient_id, .. } => *recipient_id,
            Sent::ClearControls { chat_id, .. } => *chat_id,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    unreachable: Mutex<HashSet<i64>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to this recipient fail
    pub fn fail_for(&self, recipient_id: i64) {
        self.unreachable.lock().unwrap().insert(recipient_id);
    }

    pub fn all(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn sent_to(&self, recipient_id: i64) -> Vec<Sent> {
        self.all()
            .into_iter()
            .filter(|sent| sent.recipient() == recipient_id)
            .collect()
    }

    /// Texts received by a recipient, in order
    pub fn texts_to(&self, recipient_id: i64) -> Vec<String> {
        self.sent_to(recipient_id)
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text_to(&self, recipient_id: i64) -> Option<String> {
        self.texts_to(recipient_id).pop()
    }

    /// Markup attached to the last text a recipient received
    pub fn last_markup_to(&self, recipient_id: i64) -> Option<Markup> {
        self.sent_to(recipient_id)
            .into_iter()
            .rev()
            .find_map(|sent| match sent {
                Sent::Text { markup, .. } => Some(markup),
                _ => None,
            })
            .flatten()
    }

    /// Image sets received by a recipient, in order
    pub fn image_sets_to(&self, recipient_id: i64) -> Vec<Vec<ImageRef>> {
        self.sent_to(recipient_id)
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Images { images, .. } => Some(images),
                _ => None,
            })
            .collect()
    }

    fn check_reachable(&self, recipient_id: i64) -> Result<()> {
        if self.unreachable.lock().unwrap().contains(&recipient_id) {
            return Err(PolskiBuddyError::Delivery(format!(
                "recipient {} blocked the bot",
                recipient_id
            )));
        }
        Ok(())
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, recipient_id: i64, text: &str, markup: Option<Markup>) -> Result<()> {
        self.check_reachable(recipient_id)?;
        self.record(Sent::Text {
            recipient_id,
            text: text.to_string(),
            markup,
        });
        Ok(())
    }

    async fn send_image_set(&self, recipient_id: i64, images: &[ImageRef]) -> Result<()> {
        self.check_reachable(recipient_id)?;
        if !images.is_empty() {
            self.record(Sent::Images {
                recipient_id,
                images: images.to_vec(),
            });
        }
        Ok(())
    }

    async fn clear_inline_controls(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.check_reachable(chat_id)?;
        self.record(Sent::ClearControls { chat_id, message_id });
        Ok(())
    }
}
