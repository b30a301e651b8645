//! Telegram Bot API adapter.

mod client;
mod router;
mod runner;
pub mod types;

pub use client::TelegramClient;
pub use router::{route_update, Command};
pub use runner::run_polling;
