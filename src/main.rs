//! tictactoe_bot - CLI entry point
//!
//! `run` starts the Telegram bot, `play` starts a terminal game.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_bot::bot::GameBot;
use tictactoe_bot::config::{BotConfig, Overrides, TOKEN_ENV};
use tictactoe_bot::console::{run_console, ConsoleTransport};
use tictactoe_bot::telegram::run_polling;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, token, api_url } => {
            init_tracing("info,tictactoe_bot=debug,reqwest=warn,hyper=warn");
            let config = BotConfig::resolve(
                config.as_deref(),
                std::env::var(TOKEN_ENV).ok(),
                Overrides { token, api_url },
            )?;
            info!("Starting Telegram bot");
            run_polling(&config).await
        }
        Command::Play => {
            // Keep stdout clean for the board.
            init_tracing("warn");
            let bot = GameBot::new(ConsoleTransport::new(std::io::stdout()));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_console(stdin, &bot).await
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();
}
