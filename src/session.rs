//! Per-chat game sessions.
//!
//! Each chat owns at most one [`Session`]. Sessions sit behind their own
//! async mutex so that one event is fully resolved, render included, before
//! the next event for the same chat gets in. Different chats never share a
//! board.

use crate::bot::{ChatId, MessageId};
use crate::games::tictactoe::{play_turn, Coord, GameError, GameState, Opponent, Phase, TurnReport};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument};

/// One game tied to one chat.
#[derive(Debug, Clone)]
pub struct Session {
    chat: ChatId,
    state: GameState,
    board_message: Option<MessageId>,
}

impl Session {
    /// Creates a fresh session: empty board, player to move.
    #[instrument]
    pub fn new(chat: ChatId) -> Self {
        info!(chat_id = %chat, "Creating new game session");
        Self {
            chat,
            state: GameState::new(),
            board_message: None,
        }
    }

    /// Chat this session belongs to.
    pub fn chat(&self) -> ChatId {
        self.chat
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Message that carries this session's keyboard, once rendered.
    pub fn board_message(&self) -> Option<MessageId> {
        self.board_message
    }

    /// Records which message carries the keyboard.
    pub fn set_board_message(&mut self, message: MessageId) {
        self.board_message = Some(message);
    }

    /// Plays one full turn. The session only changes on success.
    #[instrument(skip(self, opponent), fields(chat_id = %self.chat))]
    pub fn play(&mut self, coord: Coord, opponent: &dyn Opponent) -> Result<TurnReport, GameError> {
        let report = play_turn(&self.state, coord, opponent)?;
        self.state = report.state;
        debug!(phase = ?self.state.phase(), board = %self.state.board(), "Turn applied");
        Ok(report)
    }
}

/// Shared handle to one session's lock.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<ChatId, SessionHandle>>>,
}

impl SessionManager {
    /// Creates an empty session manager.
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<ChatId, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new game for `chat`, replacing any game already running.
    #[instrument(skip(self))]
    pub fn start(&self, chat: ChatId) -> SessionHandle {
        let handle = Arc::new(tokio::sync::Mutex::new(Session::new(chat)));
        if self.sessions().insert(chat, handle.clone()).is_some() {
            info!(chat_id = %chat, "Replaced running session");
        }
        handle
    }

    /// Gets the running session for `chat`.
    #[instrument(skip(self))]
    pub fn get(&self, chat: ChatId) -> Option<SessionHandle> {
        let session = self.sessions().get(&chat).cloned();
        if session.is_none() {
            debug!(chat_id = %chat, "Session not found");
        }
        session
    }

    /// Drops the session for `chat`. Returns whether one existed.
    #[instrument(skip(self))]
    pub fn stop(&self, chat: ChatId) -> bool {
        let removed = self.sessions().remove(&chat).is_some();
        info!(chat_id = %chat, removed, "Stopped session");
        removed
    }

    /// Drops `handle`'s session once it is finished.
    ///
    /// If the chat has since started a newer game the entry is left alone.
    #[instrument(skip(self, handle))]
    pub fn finish(&self, chat: ChatId, handle: &SessionHandle) {
        let mut sessions = self.sessions();
        if sessions.get(&chat).is_some_and(|current| Arc::ptr_eq(current, handle)) {
            sessions.remove(&chat);
            debug!(chat_id = %chat, "Finished session removed");
        }
    }

    /// Number of running sessions.
    pub fn active_count(&self) -> usize {
        self.sessions().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, RandomOpponent};

    #[test]
    fn test_start_replaces_existing() {
        let manager = SessionManager::new();
        let chat = ChatId(5);
        let first = manager.start(chat);
        let second = manager.start(chat);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&manager.get(chat).unwrap(), &second));
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn test_stop_removes() {
        let manager = SessionManager::new();
        manager.start(ChatId(1));
        assert!(manager.stop(ChatId(1)));
        assert!(!manager.stop(ChatId(1)));
        assert!(manager.get(ChatId(1)).is_none());
    }

    #[test]
    fn test_finish_ignores_replaced_session() {
        let manager = SessionManager::new();
        let chat = ChatId(9);
        let old = manager.start(chat);
        let new = manager.start(chat);
        manager.finish(chat, &old);
        assert!(Arc::ptr_eq(&manager.get(chat).unwrap(), &new));
        manager.finish(chat, &new);
        assert!(manager.get(chat).is_none());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let manager = SessionManager::new();
        let opponent = RandomOpponent::seeded(3);
        let a = manager.start(ChatId(1));
        let b = manager.start(ChatId(2));

        a.blocking_lock().play(Coord::new(1, 1).unwrap(), &opponent).unwrap();

        assert_eq!(a.blocking_lock().state().board().count(Mark::X), 1);
        assert_eq!(b.blocking_lock().state().board().count(Mark::X), 0);
    }

    #[test]
    fn test_failed_play_keeps_state() {
        let opponent = RandomOpponent::seeded(8);
        let mut session = Session::new(ChatId(3));
        let coord = Coord::new(0, 0).unwrap();
        session.play(coord, &opponent).unwrap();
        let before = *session.state();

        assert_eq!(session.play(coord, &opponent), Err(GameError::CellOccupied(coord)));
        assert_eq!(*session.state(), before);
    }
}
