use serde::{Deserialize, Serialize};

/// Stable identifier of a private chat, group or channel
pub type ChatId = i64;

/// One inbound event. Only message updates are routed; other kinds
/// deserialize with `message: None` and are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

/// Envelope wrapped around every Bot API result
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_text_message_update() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 10001,
            "message": {
                "message_id": 7,
                "date": 1700000000,
                "chat": {"id": -1001234, "type": "supergroup", "title": "team"},
                "from": {"id": 42, "is_bot": false, "first_name": "Li", "language_code": "zh-hans"},
                "text": "你好"
            }
        }))
        .unwrap();

        let message = update.message.unwrap();
        assert_eq!(message.chat.id, -1001234);
        assert_eq!(message.chat.kind, "supergroup");
        assert_eq!(message.text.as_deref(), Some("你好"));
    }

    #[test]
    fn non_message_updates_have_no_message() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 5,
            "edited_message": {"message_id": 1, "chat": {"id": 1, "type": "private"}, "text": "x"}
        }))
        .unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn photo_message_has_no_text() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 6,
            "message": {"message_id": 2, "chat": {"id": 1, "type": "private"}, "photo": []}
        }))
        .unwrap();
        assert!(update.message.unwrap().text.is_none());
    }

    #[test]
    fn parse_mode_uses_api_names() {
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), json!("HTML"));
    }
}
