//! Terminal adapter for playing without a bot token.
//!
//! Boards and alerts are written as plain text; input is one command per
//! line. Everything goes through the same [`GameBot`] as the Telegram path.

use crate::bot::{ChatId, GameBot, Inbound, MessageId, RenderTarget, Transport, TransportError};
use crate::games::tictactoe::{Board, Coord};
use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument};

/// The single chat used by the console.
pub const CONSOLE_CHAT: ChatId = ChatId(0);

const HELP: &str = "Commands: start, stop, quit, or a cell as two digits RC (row, column), e.g. 11 for the center.";

/// Transport that prints to a writer.
#[derive(Debug)]
pub struct ConsoleTransport<W> {
    out: Mutex<W>,
    last_message: AtomicI64,
}

impl<W: Write + Send> ConsoleTransport<W> {
    /// Creates a transport writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            last_message: AtomicI64::new(0),
        }
    }

    /// Message id of the most recently posted board.
    pub fn current_message(&self) -> MessageId {
        MessageId(self.last_message.load(Ordering::SeqCst))
    }

    /// Consumes the transport, returning the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: &str) -> Result<(), TransportError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}

/// Draws a board as three lines of glyphs.
fn draw(board: &Board) -> String {
    board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.glyph().to_string())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n---------\n")
}

#[async_trait]
impl<W: Write + Send> Transport for ConsoleTransport<W> {
    async fn render_board(
        &self,
        _chat: ChatId,
        target: RenderTarget,
        board: &Board,
        status: &str,
    ) -> Result<MessageId, TransportError> {
        let message = match target {
            RenderTarget::New => MessageId(self.last_message.fetch_add(1, Ordering::SeqCst) + 1),
            RenderTarget::Edit(message) => message,
        };
        self.write(&format!("{}\n\n{status}\n", draw(board)))?;
        Ok(message)
    }

    async fn acknowledge(&self, _event_id: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn reject_with_alert(&self, _event_id: &str, message: &str) -> Result<(), TransportError> {
        self.write(&format!("! {message}"))
    }

    async fn send_text(&self, _chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.write(text)
    }
}

/// Reads commands from `input` until EOF or `quit`.
#[instrument(skip_all)]
pub async fn run_console<R, W>(input: R, bot: &GameBot<ConsoleTransport<W>>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    bot.transport().write(HELP)?;
    let mut lines = input.lines();
    let mut taps: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let event = match line.trim_start_matches('/') {
            "" => continue,
            "quit" | "exit" => break,
            "start" => Inbound::Start { chat: CONSOLE_CHAT },
            "stop" => Inbound::Stop { chat: CONSOLE_CHAT },
            token => match Coord::from_token(token) {
                Ok(coord) => {
                    taps += 1;
                    Inbound::Move {
                        chat: CONSOLE_CHAT,
                        event_id: taps.to_string(),
                        message: bot.transport().current_message(),
                        coord,
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Unrecognized input");
                    bot.transport().write(HELP)?;
                    continue;
                }
            },
        };
        bot.handle(event).await?;
    }
    Ok(())
}
