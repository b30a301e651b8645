//! Dispatches inbound events to sessions and renders the result.

use super::status::{self, status_text};
use super::{ChatId, Inbound, MessageId, RenderTarget, Transport, TransportError};
use crate::games::tictactoe::{Coord, GameError, Opponent, RandomOpponent};
use crate::session::SessionManager;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The game bot: sessions, opponent and a transport to talk back through.
pub struct GameBot<T> {
    transport: T,
    sessions: SessionManager,
    opponent: Arc<dyn Opponent>,
}

impl<T: Transport> GameBot<T> {
    /// Creates a bot with a random opponent.
    pub fn new(transport: T) -> Self {
        Self::with_opponent(transport, Arc::new(RandomOpponent::new()))
    }

    /// Creates a bot with a custom opponent.
    pub fn with_opponent(transport: T, opponent: Arc<dyn Opponent>) -> Self {
        Self {
            transport,
            sessions: SessionManager::new(),
            opponent,
        }
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the bot, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Returns the session manager.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Handles one inbound event to completion.
    ///
    /// Game errors are answered in-chat and never returned; the only errors
    /// coming back are transport failures.
    #[instrument(skip(self), fields(chat_id = %event.chat()))]
    pub async fn handle(&self, event: Inbound) -> Result<(), TransportError> {
        match event {
            Inbound::Start { chat } => self.start(chat).await,
            Inbound::Stop { chat } => self.stop(chat).await,
            Inbound::Move {
                chat,
                event_id,
                message,
                coord,
            } => self.play(chat, &event_id, message, coord).await,
        }
    }

    async fn start(&self, chat: ChatId) -> Result<(), TransportError> {
        let handle = self.sessions.start(chat);
        let mut session = handle.lock().await;
        let message = self
            .transport
            .render_board(chat, RenderTarget::New, session.state().board(), status::STARTED)
            .await?;
        session.set_board_message(message);
        info!(%message, "Game started");
        Ok(())
    }

    async fn stop(&self, chat: ChatId) -> Result<(), TransportError> {
        let text = if self.sessions.stop(chat) {
            status::STOPPED
        } else {
            status::NOT_RUNNING
        };
        self.transport.send_text(chat, text).await
    }

    async fn play(&self, chat: ChatId, event_id: &str, message: MessageId, coord: Coord) -> Result<(), TransportError> {
        let Some(handle) = self.sessions.get(chat) else {
            warn!(error = %GameError::NoSessionActive, "Move without a game");
            return self.transport.reject_with_alert(event_id, status::NO_SESSION).await;
        };

        // Held until the render below completes.
        let mut session = handle.lock().await;

        if session.board_message() != Some(message) {
            debug!(%message, current = ?session.board_message(), "Tap on a stale board");
            return self.transport.reject_with_alert(event_id, status::STALE_BOARD).await;
        }

        let report = match session.play(coord, self.opponent.as_ref()) {
            Ok(report) => report,
            Err(GameError::CellOccupied(_)) => {
                debug!(%coord, "Cell occupied");
                return self.transport.reject_with_alert(event_id, status::CELL_OCCUPIED).await;
            }
            Err(GameError::GameOver) => {
                return self.transport.reject_with_alert(event_id, status::GAME_OVER).await;
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                return self.transport.reject_with_alert(event_id, &e.to_string()).await;
            }
        };

        self.transport.acknowledge(event_id).await?;
        self.transport
            .render_board(
                chat,
                RenderTarget::Edit(message),
                report.state.board(),
                &status_text(report.phase()),
            )
            .await?;

        if let Some(outcome) = report.phase().outcome() {
            info!(?outcome, board = %report.state.board(), "Game finished");
            self.sessions.finish(chat, &handle);
        }
        Ok(())
    }
}
