//! Background handling of inbound events, in arrival order per chat.

use super::{ChatId, GameBot, Inbound, Transport};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, instrument, trace};

/// Hands events to background tasks.
///
/// Each event's task first waits for the task of the previous event from
/// the same chat, so a chat's events are resolved one after another in the
/// order they were dispatched. Different chats run concurrently.
pub struct ChatDispatcher<T> {
    bot: Arc<GameBot<T>>,
    tails: HashMap<ChatId, JoinHandle<()>>,
}

impl<T: Transport + 'static> ChatDispatcher<T> {
    /// Creates a dispatcher feeding `bot`.
    pub fn new(bot: Arc<GameBot<T>>) -> Self {
        Self {
            bot,
            tails: HashMap::new(),
        }
    }

    /// Returns the bot.
    pub fn bot(&self) -> &Arc<GameBot<T>> {
        &self.bot
    }

    /// Queues `event` behind earlier events of its chat.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self), fields(chat_id = %event.chat()))]
    pub fn dispatch(&mut self, event: Inbound) {
        self.tails.retain(|_, task| !task.is_finished());

        let chat = event.chat();
        let previous = self.tails.remove(&chat);
        trace!(queued_behind = previous.is_some(), "Dispatching event");

        let bot = Arc::clone(&self.bot);
        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                // Only completion matters here; failures were logged by that task.
                let _ = previous.await;
            }
            if let Err(e) = bot.handle(event).await {
                error!(chat_id = %chat, error = %e, "Failed to handle event");
            }
        });
        self.tails.insert(chat, task);
    }

    /// Number of chats with events still in flight.
    pub fn in_flight(&self) -> usize {
        self.tails.values().filter(|task| !task.is_finished()).count()
    }

    /// Waits for every dispatched event to finish.
    pub async fn drain(&mut self) {
        for (_, task) in self.tails.drain() {
            let _ = task.await;
        }
    }
}
