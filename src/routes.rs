use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::handlers;
use crate::state::AppState;
use crate::telegram::Update;

const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

pub fn create_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Telegram webhook
        .route(&state.config.server_config.webhook_path, post(webhook_handler))
        // Health check
        .route("/api/health", get(health_check))
}

/// Routes with tracing and state attached, ready to serve
pub fn create_app(state: AppState) -> Router {
    create_routes(&state)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Always answers 200 once the secret matches; Telegram would otherwise
/// redeliver the same update
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    if let Some(expected) = state.config.server_config.secret_token.as_deref() {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            warn!("Rejected webhook call with a missing or wrong secret token");
            return (StatusCode::UNAUTHORIZED, "Unauthorized");
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Discarding malformed update: {}", e);
            return (StatusCode::OK, "OK");
        }
    };

    let update_id = update.update_id;
    if let Err(e) = handlers::handle_update(&state, update).await {
        error!("Error handling update {}: {}", update_id, e);
    }

    (StatusCode::OK, "OK")
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "enabled_chats": state.chat_states.enabled_count()
    }))
}
