//! Inbound events and the identifiers they carry.

use crate::games::tictactoe::Coord;
use serde::{Deserialize, Serialize};

/// Identifies a chat, and with it the chat's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct ChatId(pub i64);

/// Identifies a message within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct MessageId(pub i64);

/// An event routed to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Start (or restart) a game.
    Start {
        /// Chat issuing the command.
        chat: ChatId,
    },
    /// Abandon the running game.
    Stop {
        /// Chat issuing the command.
        chat: ChatId,
    },
    /// A tap on a board cell.
    Move {
        /// Chat the board lives in.
        chat: ChatId,
        /// Platform id of the tap, used to acknowledge or reject it.
        event_id: String,
        /// Message carrying the tapped keyboard.
        message: MessageId,
        /// Tapped cell.
        coord: Coord,
    },
}

impl Inbound {
    /// Chat the event belongs to.
    pub fn chat(&self) -> ChatId {
        match self {
            Inbound::Start { chat } | Inbound::Stop { chat } | Inbound::Move { chat, .. } => *chat,
        }
    }
}

/// Where a board render should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Post a new message.
    New,
    /// Edit the keyboard message in place.
    Edit(MessageId),
}
