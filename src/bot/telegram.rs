//! Telegram side of the reply seam.

use super::reply::{ChatReply, Choice};
use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::debug;

/// Replies into one Telegram chat, optionally bound to a message to edit.
pub struct TelegramReply {
    bot: Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
}

impl TelegramReply {
    /// Reply to a chat with new messages only.
    #[must_use]
    pub const fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            message_id: None,
        }
    }

    /// Reply bound to an existing message, as needed for button presses.
    #[must_use]
    pub const fn editing(bot: Bot, chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            message_id: Some(message_id),
        }
    }
}

/// One button per row.
#[must_use]
pub fn choice_keyboard(choices: &[Choice]) -> InlineKeyboardMarkup {
    let rows = choices
        .iter()
        .map(|c| vec![InlineKeyboardButton::callback(c.label.clone(), c.payload.clone())]);
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl ChatReply for TelegramReply {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_choices(&self, text: &str, choices: &[Choice]) -> Result<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_markup(choice_keyboard(choices))
            .await?;
        Ok(())
    }

    async fn edit_text(&self, text: &str) -> Result<()> {
        let Some(message_id) = self.message_id else {
            debug!("No message to edit in chat {}, sending instead", self.chat_id.0);
            return self.send_text(text).await;
        };
        self.bot
            .edit_message_text(self.chat_id, message_id, text)
            .await?;
        Ok(())
    }
}
