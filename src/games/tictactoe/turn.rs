//! The turn protocol as a pure transition function.
//!
//! A turn is the player's move, the terminal checks, the opponent's reply
//! and the terminal checks again. [`play_turn`] resolves all of it in one
//! call and never suspends, so a session can treat a turn as atomic.

use super::rules::{is_draw, winner};
use super::{Board, Coord, GameError, Mark, Opponent, OPPONENT_MARK, PLAYER_MARK};
use tracing::{debug, info, instrument, warn};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The human completed a line.
    PlayerWin,
    /// The computer completed a line.
    OpponentWin,
    /// The board filled up with no line.
    Draw,
}

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the human to pick a cell.
    AwaitingPlayerMove,
    /// The game ended. Absorbing until a new game is started.
    Terminal(Outcome),
}

impl Phase {
    /// True once the game has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    /// Returns the outcome if the game has ended.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Terminal(outcome) => Some(outcome),
            Phase::AwaitingPlayerMove => None,
        }
    }
}

/// Complete state of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Mark,
    phase: Phase,
}

impl GameState {
    /// Fresh game: empty board, player to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: PLAYER_MARK,
            phase: Phase::AwaitingPlayerMove,
        }
    }

    /// Resumes from an arbitrary board with the player to move.
    ///
    /// The phase is derived from the board, so a board that already holds a
    /// line or is full comes back terminal.
    pub fn from_board(board: Board) -> Self {
        let phase = match evaluate(&board) {
            Some(outcome) => Phase::Terminal(outcome),
            None => Phase::AwaitingPlayerMove,
        };
        Self {
            board,
            turn: PLAYER_MARK,
            phase,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark expected to move next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened during one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// State after the turn.
    pub state: GameState,
    /// Cell the player took.
    pub player_move: Coord,
    /// Cell the opponent took, if the game was still open after the player.
    pub opponent_move: Option<Coord>,
}

impl TurnReport {
    /// Shortcut for `self.state.phase()`.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }
}

/// Classifies a board: winner first, then draw.
fn evaluate(board: &Board) -> Option<Outcome> {
    match winner(board) {
        Some(mark) if mark == PLAYER_MARK => Some(Outcome::PlayerWin),
        Some(_) => Some(Outcome::OpponentWin),
        None if is_draw(board) => Some(Outcome::Draw),
        None => None,
    }
}

/// Resolves one full turn starting from `state`.
///
/// # Errors
///
/// - [`GameError::GameOver`] if `state` is already terminal.
/// - [`GameError::CellOccupied`] if `coord` is taken. `state` is not touched
///   in either case.
#[instrument(skip(state, opponent), fields(board = %state.board, %coord))]
pub fn play_turn(state: &GameState, coord: Coord, opponent: &dyn Opponent) -> Result<TurnReport, GameError> {
    if state.phase.is_terminal() {
        warn!("Move on a finished game");
        return Err(GameError::GameOver);
    }

    let board = state.board.apply_move(coord, PLAYER_MARK)?;
    if let Some(outcome) = evaluate(&board) {
        info!(?outcome, "Game ended on player move");
        return Ok(TurnReport {
            state: GameState {
                board,
                turn: OPPONENT_MARK,
                phase: Phase::Terminal(outcome),
            },
            player_move: coord,
            opponent_move: None,
        });
    }

    // Board is open and not a draw, so there is at least one empty cell.
    let Some(reply) = opponent.choose_move(&board) else {
        warn!("Opponent found no empty cell on an open board");
        return Err(GameError::GameOver);
    };
    let board = board.apply_move(reply, OPPONENT_MARK)?;
    debug!(%reply, board = %board, "Opponent replied");

    let phase = match evaluate(&board) {
        Some(outcome) => {
            info!(?outcome, "Game ended on opponent move");
            Phase::Terminal(outcome)
        }
        None => Phase::AwaitingPlayerMove,
    };

    Ok(TurnReport {
        state: GameState {
            board,
            turn: if phase.is_terminal() { OPPONENT_MARK } else { PLAYER_MARK },
            phase,
        },
        player_move: coord,
        opponent_move: Some(reply),
    })
}
