//! Texts shown to the player.

use crate::games::tictactoe::{Outcome, Phase, PLAYER_MARK};

/// Status line of a freshly started board.
pub const STARTED: &str = "Game started! You play X. Your move.";

/// Reply to the stop command.
pub const STOPPED: &str = "Game stopped. Send /start to play again.";

/// Reply to the stop command when nothing is running.
pub const NOT_RUNNING: &str = "No game in progress.";

/// Alert for a tap on a filled cell.
pub const CELL_OCCUPIED: &str = "You can't move there!";

/// Alert for a tap when the chat has no game.
pub const NO_SESSION: &str = "No game in progress. Send /start to begin.";

/// Alert for a tap on a keyboard from an earlier game.
pub const STALE_BOARD: &str = "This board is no longer active. Send /start to begin.";

/// Alert for a tap that raced the end of the game.
pub const GAME_OVER: &str = "The game is over. Send /start to play again.";

/// Status line under the board for `phase`.
pub fn status_text(phase: Phase) -> String {
    match phase {
        Phase::AwaitingPlayerMove => format!("Your move ({PLAYER_MARK})"),
        Phase::Terminal(Outcome::PlayerWin) => "You won! Send /start to play again.".to_string(),
        Phase::Terminal(Outcome::OpponentWin) => "The bot won! Send /start to play again.".to_string(),
        Phase::Terminal(Outcome::Draw) => "Draw! Send /start to play again.".to_string(),
    }
}
