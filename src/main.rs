mod chat_state;
mod config_manager;
mod handlers;
mod language;
mod polling;
mod routes;
mod state;
mod telegram;
mod translate;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config_manager::{Config, RunMode};
use state::AppState;
use telegram::TelegramClient;

const DEFAULT_LOG_FILTER: &str = "translate_bot=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Translation bot starting");

    let config = Config::load().context("Invalid configuration")?;

    let telegram = Arc::new(TelegramClient::new(
        config.bot_config.api_base_url.clone(),
        config.bot_config.token.clone(),
    ));

    let me = telegram
        .get_me()
        .await
        .context("Failed to reach the Bot API with the configured token")?;
    info!(
        "Authorized as @{} (id {})",
        me.username.as_deref().unwrap_or(&me.first_name),
        me.id
    );

    let mode = config.bot_config.mode;
    let app_state = AppState::new(config, telegram.clone(), me.username);

    match mode {
        RunMode::Polling => polling::run_polling(app_state, &telegram).await,
        RunMode::Webhook => run_webhook(app_state, &telegram).await,
    }
}

async fn run_webhook(app_state: AppState, telegram: &TelegramClient) -> Result<()> {
    let server_config = &app_state.config.server_config;
    let webhook_url = server_config
        .webhook_url()
        .context("Webhook mode requires a public URL")?;
    let secret_token = server_config.secret_token.clone().unwrap_or_default();
    let addr = server_config
        .bind_addr()
        .with_context(|| format!("Invalid listen address {}:{}", server_config.host, server_config.port))?;

    telegram
        .set_webhook(&webhook_url, &secret_token)
        .await
        .context("Failed to register webhook")?;
    info!("Registered webhook at {}", webhook_url);

    let app = routes::create_app(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received Ctrl-C, shutting down");
        })
        .await?;

    Ok(())
}
