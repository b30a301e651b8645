//! The outbound port every chat adapter implements.

use super::{ChatId, MessageId, RenderTarget};
use crate::games::tictactoe::Board;
use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::instrument;

/// Render instructions sent back to the chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Draws `board` as a 3x3 keyboard with `status` above it.
    ///
    /// Returns the id of the message carrying the keyboard.
    async fn render_board(
        &self,
        chat: ChatId,
        target: RenderTarget,
        board: &Board,
        status: &str,
    ) -> Result<MessageId, TransportError>;

    /// Confirms a tap without showing anything.
    async fn acknowledge(&self, event_id: &str) -> Result<(), TransportError>;

    /// Answers a tap with a blocking alert.
    async fn reject_with_alert(&self, event_id: &str, message: &str) -> Result<(), TransportError>;

    /// Posts a plain text message.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError>;
}

/// Transport error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for TransportError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}
