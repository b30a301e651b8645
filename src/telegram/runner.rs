//! Long-polling loop.

use super::client::TelegramClient;
use super::router::route_update;
use super::types::Update;
use crate::bot::{ChatDispatcher, GameBot};
use crate::config::BotConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Runs the bot until Ctrl+C.
///
/// Routed updates are handled in the background. Updates from one chat are
/// handled strictly in the order they were received.
#[instrument(skip_all, fields(api_url = %config.api_url()))]
pub async fn run_polling(config: &BotConfig) -> Result<()> {
    let client = TelegramClient::new(config).context("Failed to build Bot API client")?;
    let me = client.get_me().await.context("Bot token rejected")?;
    info!(bot_id = me.id, username = ?me.username, "Connected to Bot API");

    let mut dispatcher = ChatDispatcher::new(Arc::new(GameBot::new(client.clone())));
    let retry_delay = Duration::from_secs(*config.retry_delay_secs());
    let mut offset: Option<i64> = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let polled = tokio::select! {
            _ = &mut shutdown => break,
            polled = client.get_updates(offset, *config.poll_timeout_secs()) => polled,
        };

        let updates = match polled {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, delay = ?retry_delay, "Polling failed, retrying");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(retry_delay) => continue,
                }
            }
        };

        offset = next_offset(offset, &updates);
        for update in &updates {
            match route_update(update) {
                Some(event) => dispatcher.dispatch(event),
                None => debug!(update_id = update.update_id, "Ignoring update"),
            }
        }
    }

    info!(
        active_sessions = dispatcher.bot().sessions().active_count(),
        in_flight = dispatcher.in_flight(),
        "Shutting down"
    );
    dispatcher.drain().await;
    Ok(())
}

/// Offset that confirms every update in `updates`.
///
/// Keeps `current` when the batch is empty.
fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
    updates.iter().map(|update| update.update_id + 1).max().or(current)
}
