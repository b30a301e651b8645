//! Maps raw updates to game events.
//!
//! Only `/start`, `/stop` and taps whose data is a valid `"RC"` token get
//! through; everything else is dropped here and never reaches the game.

use super::types::Update;
use crate::bot::Inbound;
use crate::games::tictactoe::Coord;
use tracing::{debug, instrument};

/// Bot commands understood in message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    /// Start or restart a game.
    Start,
    /// Abandon the running game.
    Stop,
}

impl Command {
    /// Parses `/start`, `/start@SomeBot` or `/start payload`.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);
        name.parse().ok()
    }
}

/// Routes one update, or returns `None` if it is not for the game.
#[instrument(skip(update), fields(update_id = update.update_id))]
pub fn route_update(update: &Update) -> Option<Inbound> {
    if let Some(message) = &update.message {
        let command = message.text.as_deref().and_then(Command::parse)?;
        let chat = message.chat.id;
        debug!(%command, %chat, "Command received");
        return Some(match command {
            Command::Start => Inbound::Start { chat },
            Command::Stop => Inbound::Stop { chat },
        });
    }

    let query = update.callback_query.as_ref()?;
    let Some(message) = &query.message else {
        debug!(query_id = %query.id, "Callback without message");
        return None;
    };
    let data = query.data.as_deref()?;
    let coord = match Coord::from_token(data) {
        Ok(coord) => coord,
        Err(e) => {
            debug!(error = %e, "Dropping callback");
            return None;
        }
    };
    Some(Inbound::Move {
        chat: message.chat.id,
        event_id: query.id.clone(),
        message: message.message_id,
        coord,
    })
}
