//! Outbound messaging port
//!
//! Services talk to users through the [`Messenger`] trait only. The Telegram
//! implementation turns [`Markup`] into teloxide keyboards and image sets into
//! photos or media groups.

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{
        ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia,
        InputMediaPhoto, KeyboardButton, KeyboardMarkup, MessageId, ReplyMarkup,
    },
};
use tracing::debug;
use crate::models::{ImageRef, Markup};
use crate::utils::errors::Result;

/// Outbound capability used by all services
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message, optionally with controls
    async fn send_text(&self, recipient_id: i64, text: &str, markup: Option<Markup>) -> Result<()>;

    /// Send an ordered set of images
    async fn send_image_set(&self, recipient_id: i64, images: &[ImageRef]) -> Result<()>;

    /// Remove the inline buttons from a message the bot sent earlier
    async fn clear_inline_controls(&self, chat_id: i64, message_id: i32) -> Result<()>;
}

/// Telegram Bot API implementation
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Convert platform-neutral controls to a Telegram keyboard
pub fn to_reply_markup(markup: Markup) -> ReplyMarkup {
    match markup {
        Markup::Inline(rows) => {
            let rows: Vec<Vec<InlineKeyboardButton>> = rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|control| InlineKeyboardButton::callback(control.label, control.action))
                        .collect()
                })
                .collect();
            ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows))
        }
        Markup::Menu(rows) => {
            let rows: Vec<Vec<KeyboardButton>> = rows
                .into_iter()
                .map(|row| row.into_iter().map(KeyboardButton::new).collect())
                .collect();
            ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
        }
    }
}

fn input_file(image: &ImageRef) -> InputFile {
    InputFile::file_id(image.as_str())
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, recipient_id: i64, text: &str, markup: Option<Markup>) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(recipient_id), text.to_string());
        if let Some(markup) = markup {
            request = request.reply_markup(to_reply_markup(markup));
        }
        request.await?;
        Ok(())
    }

    async fn send_image_set(&self, recipient_id: i64, images: &[ImageRef]) -> Result<()> {
        debug!(recipient_id = recipient_id, count = images.len(), "Sending image set");
        match images {
            [] => {}
            // media groups need at least two items
            [single] => {
                self.bot.send_photo(ChatId(recipient_id), input_file(single)).await?;
            }
            many => {
                let media: Vec<InputMedia> = many
                    .iter()
                    .map(|image| InputMedia::Photo(InputMediaPhoto::new(input_file(image))))
                    .collect();
                self.bot.send_media_group(ChatId(recipient_id), media).await?;
            }
        }
        Ok(())
    }

    async fn clear_inline_controls(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .edit_message_reply_markup(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }
}
