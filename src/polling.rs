use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::handlers;
use crate::state::AppState;
use crate::telegram::{TelegramClient, TelegramError, Update};

/// Pause after a failed `getUpdates` before polling again
const POLL_ERROR_DELAY: Duration = Duration::from_secs(3);

/// How long in-flight updates may keep running after Ctrl-C
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Long-poll the Bot API until Ctrl-C
pub async fn run_polling(state: AppState, telegram: &TelegramClient) -> anyhow::Result<()> {
    // getUpdates is refused while a webhook is registered
    if let Err(e) = telegram.delete_webhook().await {
        warn!("Failed to remove existing webhook: {}", e);
    }

    info!(
        "Polling for updates (timeout {}s)",
        state.config.bot_config.poll_timeout_secs
    );

    let mut offset = None;
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
    loop {
        in_flight.retain(|task| !task.is_finished());

        let polled = tokio::select! {
            polled = poll_once(&state, telegram, offset) => polled,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, stopping polling");
                drain_tasks(in_flight, SHUTDOWN_GRACE).await;
                return Ok(());
            }
        };

        match polled {
            Ok((next_offset, tasks)) => {
                offset = next_offset;
                in_flight.extend(tasks);
            }
            Err(e) => {
                error!("getUpdates failed: {}", e);
                tokio::time::sleep(POLL_ERROR_DELAY).await;
            }
        }
    }
}

/// Fetch one batch, spawn a task per update and return the next offset
pub async fn poll_once(
    state: &AppState,
    telegram: &TelegramClient,
    offset: Option<i64>,
) -> Result<(Option<i64>, Vec<JoinHandle<()>>), TelegramError> {
    let updates = telegram
        .get_updates(offset, state.config.bot_config.poll_timeout_secs)
        .await?;

    let mut next_offset = offset;
    let mut tasks = Vec::with_capacity(updates.len());
    for update in updates {
        let after = update.update_id + 1;
        next_offset = Some(next_offset.map_or(after, |o| o.max(after)));
        tasks.push(dispatch(state, update));
    }

    Ok((next_offset, tasks))
}

/// Wait up to `grace` in total for dispatched updates, then abort the rest.
/// Returns how many tasks were aborted.
pub async fn drain_tasks(tasks: Vec<JoinHandle<()>>, grace: Duration) -> usize {
    let pending = tasks.iter().filter(|task| !task.is_finished()).count();
    if pending == 0 {
        return 0;
    }
    info!("Waiting for {} in-flight update(s)", pending);

    let deadline = tokio::time::Instant::now() + grace;
    let mut aborted = 0;
    for mut task in tasks {
        if tokio::time::timeout_at(deadline, &mut task).await.is_err() {
            task.abort();
            aborted += 1;
        }
    }
    if aborted > 0 {
        warn!("Aborted {} update(s) still running at shutdown", aborted);
    }
    aborted
}

/// Handle an update on its own task; a slow translation only stalls its own message
pub fn dispatch(state: &AppState, update: Update) -> JoinHandle<()> {
    let state = state.clone();
    tokio::spawn(async move {
        let update_id = update.update_id;
        if let Err(e) = handlers::handle_update(&state, update).await {
            error!("Error handling update {}: {}", update_id, e);
        }
    })
}
