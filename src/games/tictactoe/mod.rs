//! Tic-tac-toe against a random opponent.
//!
//! Everything in this module is pure: no I/O, no transport types. The bot
//! layer drives it through [`play_turn`] and renders whatever comes back.

mod action;
mod opponent;
mod position;
mod rules;
mod turn;
mod types;

pub use action::GameError;
pub use opponent::{available_moves, choose_opponent_move, Opponent, RandomOpponent};
pub use position::Coord;
pub use rules::{has_winner, is_draw, is_full, winner, LINES};
pub use turn::{play_turn, GameState, Outcome, Phase, TurnReport};
pub use types::{Board, Cell, Mark, EMPTY_GLYPH};

/// Mark played by the human. Always moves first.
pub const PLAYER_MARK: Mark = Mark::X;

/// Mark played by the computer opponent.
pub const OPPONENT_MARK: Mark = Mark::O;
