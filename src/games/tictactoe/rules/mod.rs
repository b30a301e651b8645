//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so the turn protocol can compose them in order.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{has_winner, winner, LINES};
