//! The computer opponent.

use super::{Board, Coord};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

/// Returns every empty cell in row-major order.
pub fn available_moves(board: &Board) -> Vec<Coord> {
    Coord::all().filter(|c| board.is_empty(*c)).collect()
}

/// Picks an empty cell uniformly at random.
///
/// Returns `None` on a full board; callers check for a draw first.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn choose_opponent_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Coord> {
    let choice = available_moves(board).choose(rng).copied();
    debug!(?choice, "Opponent chose cell");
    choice
}

/// Something that picks the opponent's reply to a player move.
pub trait Opponent: Send + Sync {
    /// Chooses an empty cell on `board`, or `None` if there is none.
    fn choose_move(&self, board: &Board) -> Option<Coord>;
}

/// Opponent that plays a uniformly random empty cell.
#[derive(Debug)]
pub struct RandomOpponent {
    rng: Mutex<StdRng>,
}

impl RandomOpponent {
    /// Creates an opponent seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates an opponent with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn choose_move(&self, board: &Board) -> Option<Coord> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        choose_opponent_move(board, &mut *rng)
    }
}
