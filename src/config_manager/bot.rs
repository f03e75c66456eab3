use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How updates reach the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Polling,
    Webhook,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polling" => Ok(RunMode::Polling),
            "webhook" => Ok(RunMode::Webhook),
            other => Err(other.to_string()),
        }
    }
}

/// Bot API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,

    #[serde(rename = "api_base_url")]
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub mode: RunMode,

    #[serde(rename = "poll_timeout_secs")]
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base_url: default_api_base_url(),
            mode: RunMode::default(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}
