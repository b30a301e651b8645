//! Command-line interface for tictactoe_bot.

use clap::{Parser, Subcommand};

/// Tic-tac-toe bot - play X against a random opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_bot")]
#[command(about = "Tic-tac-toe played through a chat bot's inline keyboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the Telegram bot (long polling)
    Run {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Bot token (overrides TG_TOKEN and the config file)
        #[arg(long)]
        token: Option<String>,

        /// Bot API base URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Play in the terminal
    Play,
}
