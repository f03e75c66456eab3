//! Doubles for routing tests: a scripted translator and a sender that records replies.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config_manager::Config;
use crate::state::AppState;
use crate::telegram::{Chat, ChatId, Message, MessageSender, ParseMode, TelegramError, Update};
use crate::translate::{TranslateError, TranslationRequest, TranslationResult, Translator};

pub struct FakeTranslator {
    outcome: Result<String, u16>,
    requests: Mutex<Vec<TranslationRequest>>,
}

impl FakeTranslator {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            outcome: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok(text) => Ok(TranslationResult { text: text.clone() }),
            Err(status) => Err(TranslateError::Status(*status)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingSender {
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), TelegramError> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            parse_mode,
        });
        Ok(())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.bot_config.token = "123456:TEST".to_string();
    config
}

pub fn test_state(translator: Arc<FakeTranslator>, sender: Arc<RecordingSender>) -> AppState {
    AppState::with_parts(test_config(), translator, sender, Some("zh_en_bot".to_string()))
}

pub fn text_update(update_id: i64, chat_id: ChatId, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: update_id,
            chat: Chat {
                id: chat_id,
                kind: "private".to_string(),
            },
            text: Some(text.to_string()),
        }),
    }
}
