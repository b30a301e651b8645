//! Errors raised while validating or applying a move.

use super::Coord;

/// Error that can occur when routing or applying a move.
///
/// None of these are fatal: every variant is recoverable by the session
/// that produced it, at worst by starting a fresh game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The targeted cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coord),

    /// The move token is not a two-digit `RC` pair in `0..=2`.
    #[display("Invalid coordinate: {:?}", _0)]
    InvalidCoordinate(String),

    /// A move arrived for a chat with no game in progress.
    #[display("No game in progress")]
    NoSessionActive,

    /// The game already reached a terminal state.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for GameError {}
