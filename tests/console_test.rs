//! Scripted terminal sessions.

use std::sync::Arc;
use tictactoe_bot::bot::GameBot;
use tictactoe_bot::bot::status;
use tictactoe_bot::console::{run_console, ConsoleTransport};
use tictactoe_bot::{Board, Coord, Opponent};

/// Takes the last free cell in row-major order.
struct LastFree;

impl Opponent for LastFree {
    fn choose_move(&self, board: &Board) -> Option<Coord> {
        Coord::all().filter(|&c| board.is_empty(c)).last()
    }
}

async fn play(script: &str) -> String {
    let bot = GameBot::with_opponent(ConsoleTransport::new(Vec::new()), Arc::new(LastFree));
    run_console(script.as_bytes(), &bot).await.unwrap();
    String::from_utf8(into_output(bot)).unwrap()
}

fn into_output(bot: GameBot<ConsoleTransport<Vec<u8>>>) -> Vec<u8> {
    bot.into_transport().into_inner()
}

#[tokio::test]
async fn test_win_from_the_terminal() {
    // Opponent fills 22, 21, 20; player takes the top row.
    let out = play("start\n00\n01\n02\n").await;

    assert!(out.contains(status::STARTED));
    assert!(out.contains("X | X | X"));
    assert!(out.contains("You won!"));
}

#[tokio::test]
async fn test_occupied_and_garbage_input() {
    let out = play("start\n22\n00\n00\nzz\nquit\n11\n").await;

    assert!(out.contains(&format!("! {}", status::CELL_OCCUPIED)));
    assert!(out.matches("Commands:").count() >= 2, "help printed for bad input");
    assert!(!out.contains("You won!"), "input after quit is ignored");
}

#[tokio::test]
async fn test_move_before_start() {
    let out = play("11\nstop\n").await;

    assert!(out.contains(&format!("! {}", status::NO_SESSION)));
    assert!(out.contains(status::NOT_RUNNING));
}
