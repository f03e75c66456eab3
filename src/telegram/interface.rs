use async_trait::async_trait;
use thiserror::Error;

use super::types::{ChatId, ParseMode};

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Bot API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Bot API call {method} rejected ({code}): {description}")]
    Api {
        method: String,
        code: i64,
        description: String,
    },

    #[error("Bot API call {method} returned an unreadable body: {reason}")]
    Decode { method: String, reason: String },
}

/// Outbound side of the chat platform, kept behind a trait so routing can
/// run without a network
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), TelegramError>;
}
