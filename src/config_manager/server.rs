use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Webhook server settings, only used in webhook mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public HTTPS base URL Telegram delivers updates to
    #[serde(rename = "public_url")]
    #[serde(default)]
    pub public_url: Option<String>,

    #[serde(rename = "webhook_path")]
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Echoed by Telegram in `X-Telegram-Bot-Api-Secret-Token`
    #[serde(rename = "secret_token")]
    #[serde(default)]
    pub secret_token: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Full URL registered with `setWebhook`
    pub fn webhook_url(&self) -> Option<String> {
        self.public_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), self.webhook_path))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            webhook_path: default_webhook_path(),
            secret_token: None,
        }
    }
}
