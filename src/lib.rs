//! tictactoe_bot library - tic-tac-toe over a chat bot
//!
//! The human plays X and moves first; the computer answers with a uniformly
//! random empty cell. Moves arrive as taps on an inline keyboard and the
//! reply edits that keyboard in place.
//!
//! # Architecture
//!
//! - **Games**: pure tic-tac-toe engine (board, rules, opponent, turn protocol)
//! - **Session**: one game per chat, serialized per chat
//! - **Bot**: platform-neutral dispatcher and the `Transport` port
//! - **Telegram**: Bot API adapter (long polling)
//! - **Console**: terminal adapter for local play
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_bot::bot::{ChatId, GameBot, Inbound};
//! use tictactoe_bot::console::ConsoleTransport;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let bot = GameBot::new(ConsoleTransport::new(std::io::stdout()));
//! bot.handle(Inbound::Start { chat: ChatId(1) }).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bot;
pub mod config;
pub mod console;
pub mod games;
pub mod session;
pub mod telegram;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Cell, Coord, GameError, GameState, Mark, Opponent, Outcome, Phase, RandomOpponent, TurnReport,
};

// Crate-level exports - Session management
pub use session::{Session, SessionHandle, SessionManager};
