use std::sync::Arc;

use crate::chat_state::ChatStateStore;
use crate::config_manager::Config;
use crate::telegram::{MessageSender, TelegramClient};
use crate::translate::{GoogleTranslateClient, Translator};

/// Everything a handler needs to answer one update
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat_states: Arc<ChatStateStore>,
    pub translator: Arc<dyn Translator>,
    pub sender: Arc<dyn MessageSender>,
    /// Our own username, used to ignore commands addressed to other bots
    pub bot_username: Option<String>,
}

impl AppState {
    pub fn new(
        config: Config,
        telegram: Arc<TelegramClient>,
        bot_username: Option<String>,
    ) -> Self {
        let translator = Arc::new(GoogleTranslateClient::new(
            config.translate_config.endpoint.clone(),
        ));
        Self::with_parts(config, translator, telegram, bot_username)
    }

    /// Assemble state from already-built parts
    pub fn with_parts(
        config: Config,
        translator: Arc<dyn Translator>,
        sender: Arc<dyn MessageSender>,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            chat_states: Arc::new(ChatStateStore::new()),
            translator,
            sender,
            bot_username,
        }
    }
}
