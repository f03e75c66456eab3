use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::interface::{MessageSender, TelegramError};
use super::types::{ApiResponse, ChatId, ParseMode, Update, User};

/// Slack on top of the long-poll timeout before a `getUpdates` request is abandoned
const LONG_POLL_MARGIN: Duration = Duration::from_secs(5);

/// Minimal Bot API client: JSON in, JSON envelope out
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

// Keep the token out of logs.
impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_with_timeout(method, params, None).await
    }

    async fn call_with_timeout<P, T>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        debug!("Calling Bot API method {}", method);

        let mut request = self.client.post(&url).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        // reqwest errors embed the request URL, which contains the token
        let response = request
            .send()
            .await
            .map_err(|e| TelegramError::Request(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Request(e.without_url()))?;

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| TelegramError::Decode {
                method: method.to_string(),
                reason: format!("HTTP {}: {}", status, e),
            })?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                ok: true,
                result: None,
                ..
            } => Err(TelegramError::Decode {
                method: method.to_string(),
                reason: "missing result".to_string(),
            }),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(TelegramError::Api {
                method: method.to_string(),
                code: error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }

    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &json!({})).await
    }

    /// Long-poll for updates starting at `offset`. A server that holds the
    /// request past `timeout_secs` plus a short margin is treated as a failed call.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let mut params = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            params["offset"] = json!(offset);
        }
        let deadline = Duration::from_secs(timeout_secs) + LONG_POLL_MARGIN;
        self.call_with_timeout("getUpdates", &params, Some(deadline))
            .await
    }

    pub async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<bool, TelegramError> {
        self.call(
            "setWebhook",
            &json!({
                "url": url,
                "secret_token": secret_token,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn delete_webhook(&self) -> Result<bool, TelegramError> {
        self.call("deleteWebhook", &json!({})).await
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), TelegramError> {
        let mut params = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(mode) = parse_mode {
            params["parse_mode"] = json!(mode);
        }
        // The sent Message object is not needed
        let _: serde_json::Value = self.call("sendMessage", &params).await?;
        Ok(())
    }
}
