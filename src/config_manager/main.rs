use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config_manager::bot::{BotConfig, RunMode};
use crate::config_manager::server::ServerConfig;
use crate::config_manager::translate::TranslateConfig;
use crate::config_manager::utils::read_config_file;

/// Tried in order when `CONFIG_PATH` is not set
const DEFAULT_CONFIG_PATHS: &[&str] = &["conf.yaml", "conf.yml", "conf.json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(String),

    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("bot token is missing: set the BOT_TOKEN environment variable")]
    MissingToken,

    #[error("configuration references unset environment variable in {0}")]
    UnresolvedVariable(String),

    #[error("invalid BOT_MODE '{0}': expected 'polling' or 'webhook'")]
    InvalidMode(String),

    #[error("invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("webhook mode needs a public URL: set WEBHOOK_URL or server_config.public_url")]
    MissingPublicUrl,
}

/// Main configuration for the bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "bot_config")]
    #[serde(default)]
    pub bot_config: BotConfig,

    #[serde(rename = "translate_config")]
    #[serde(default)]
    pub translate_config: TranslateConfig,

    #[serde(rename = "server_config")]
    #[serde(default)]
    pub server_config: ServerConfig,
}

impl Config {
    /// Load configuration from `CONFIG_PATH` (or a default file if present)
    /// and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_PATH").ok().or_else(|| {
            DEFAULT_CONFIG_PATHS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| p.to_string())
        });
        Self::load_with(path.as_deref(), |name| std::env::var(name).ok())
    }

    /// Load configuration with an explicit file and variable lookup.
    /// With no file every section takes its defaults.
    pub fn load_with<F>(path: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                let config = read_config_file(path, &env)?;
                info!("Loaded configuration from: {}", path);
                config
            }
            None => Config::default(),
        };

        config.apply_env_overrides(&env)?;
        config.validate()?;
        config.fill_derived_settings();
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, env: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = non_empty(env("BOT_TOKEN")) {
            self.bot_config.token = token;
        }

        if let Some(mode) = non_empty(env("BOT_MODE")) {
            self.bot_config.mode = mode.parse().map_err(ConfigError::InvalidMode)?;
        }

        if let Some(url) = non_empty(env("WEBHOOK_URL")) {
            self.server_config.public_url = Some(url);
            self.bot_config.mode = RunMode::Webhook;
        }

        if let Some(port) = non_empty(env("PORT")) {
            self.server_config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let token = self.bot_config.token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if token.contains("${") {
            return Err(ConfigError::UnresolvedVariable("bot_config.token".to_string()));
        }

        if self.bot_config.mode == RunMode::Webhook {
            match self.server_config.public_url.as_deref() {
                None | Some("") => return Err(ConfigError::MissingPublicUrl),
                Some(url) if url.contains("${") => {
                    return Err(ConfigError::UnresolvedVariable(
                        "server_config.public_url".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    fn fill_derived_settings(&mut self) {
        if !self.server_config.webhook_path.starts_with('/') {
            self.server_config.webhook_path = format!("/{}", self.server_config.webhook_path);
        }

        // a blank secret would make every webhook call fail the header check
        self.server_config.secret_token = non_empty(self.server_config.secret_token.take());
        if self.bot_config.mode == RunMode::Webhook && self.server_config.secret_token.is_none() {
            self.server_config.secret_token = Some(Uuid::new_v4().simple().to_string());
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
