pub mod types;
pub mod interface;
pub mod client;

pub use types::{Chat, ChatId, Message, ParseMode, Update};
pub use interface::{MessageSender, TelegramError};
pub use client::TelegramClient;
