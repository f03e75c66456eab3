use dashmap::DashMap;

use crate::telegram::ChatId;

/// Per-chat translation switch, held for the lifetime of the process
#[derive(Debug, Default)]
pub struct ChatStateStore {
    enabled: DashMap<ChatId, bool>,
}

impl ChatStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chats that never ran `/on` are disabled.
    pub fn get(&self, chat_id: ChatId) -> bool {
        self.enabled.get(&chat_id).map(|e| *e.value()).unwrap_or(false)
    }

    pub fn set(&self, chat_id: ChatId, enabled: bool) {
        self.enabled.insert(chat_id, enabled);
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|e| *e.value()).count()
    }
}
