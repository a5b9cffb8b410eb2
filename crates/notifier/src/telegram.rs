use teloxide::prelude::*;

use herald_common::error::DispatchError;

use crate::MessageSink;

/// Sends notifications to a single Telegram chat.
pub struct TelegramSender {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSender {
    pub fn new(token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id.0
    }
}

impl MessageSink for TelegramSender {
    async fn send(&self, text: &str) -> Result<(), DispatchError> {
        self.bot
            .send_message(self.chat_id, text)
            .await
            .map_err(|e| DispatchError {
                chat_id: self.chat_id.0,
                source: Box::new(e),
            })?;

        tracing::info!(chat_id = self.chat_id.0, message = text, "Notification sent");
        Ok(())
    }
}
