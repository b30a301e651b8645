//! Thin Bot API client over `reqwest`.

use super::types::{
    AnswerCallbackQuery, ApiResponse, EditMessageText, GetUpdates, InlineKeyboardMarkup, Message, SendMessage, Update,
    User,
};
use crate::bot::{ChatId, Keyboard, MessageId, RenderTarget, Transport, TransportError};
use crate::config::BotConfig;
use crate::games::tictactoe::Board;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Error text the API returns when an edit changes nothing.
const NOT_MODIFIED: &str = "message is not modified";

/// Bot API client bound to one bot token.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    /// `{api_url}/bot{token}`; never logged.
    endpoint: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Creates a client from startup configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be built.
    #[instrument(skip(config), fields(api_url = %config.api_url()))]
    pub fn new(config: &BotConfig) -> Result<Self, TransportError> {
        // Leave headroom over the long-poll timeout so the server answers first.
        let timeout = Duration::from_secs(*config.poll_timeout_secs() + 10);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::new(format!("HTTP client setup failed: {}", e.without_url())))?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{}", config.api_url().trim_end_matches('/'), config.token()),
        })
    }

    /// Calls a Bot API method with a JSON body.
    #[instrument(skip(self, params))]
    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response: ApiResponse<R> = self
            .client
            .post(format!("{}/{}", self.endpoint, method))
            .json(params)
            .send()
            .await
            .map_err(|e| TransportError::new(format!("{method} request failed: {}", e.without_url())))?
            .json()
            .await
            .map_err(|e| TransportError::new(format!("{method} response unreadable: {}", e.without_url())))?;

        response.into_result(method).inspect_err(|e| debug!(error = %e, "API call failed"))
    }

    /// Returns the bot's own account; doubles as a token check.
    pub async fn get_me(&self) -> Result<User, TransportError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-polls for updates starting at `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>, TransportError> {
        let updates: Vec<Update> = self.call("getUpdates", &GetUpdates::long_poll(offset, timeout_secs)).await?;
        if !updates.is_empty() {
            debug!(count = updates.len(), "Received updates");
        }
        Ok(updates)
    }

    /// Sends a message, optionally with a keyboard.
    #[instrument(skip(self, text, reply_markup))]
    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Message, TransportError> {
        let params = SendMessage {
            chat_id,
            text,
            reply_markup,
        };
        self.call("sendMessage", &params).await
    }

    /// Replaces a message's text and keyboard.
    ///
    /// An edit that changes nothing is treated as success.
    #[instrument(skip(self, text, reply_markup))]
    pub async fn edit_message_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        let params = EditMessageText {
            chat_id,
            message_id,
            text,
            reply_markup,
        };
        ignore_not_modified(self.call::<_, serde_json::Value>("editMessageText", &params).await)
    }

    /// Answers a callback query, optionally with an alert.
    #[instrument(skip(self, text))]
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError> {
        let params = AnswerCallbackQuery {
            callback_query_id,
            text,
            show_alert,
        };
        let answered: bool = self.call("answerCallbackQuery", &params).await?;
        if !answered {
            warn!(callback_query_id, "Callback answer not accepted");
        }
        Ok(())
    }
}

/// Treats an edit rejected for changing nothing as a success.
fn ignore_not_modified<T>(result: Result<T, TransportError>) -> Result<(), TransportError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.message.contains(NOT_MODIFIED) => {
            debug!("Edit was a no-op");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn render_board(
        &self,
        chat: ChatId,
        target: RenderTarget,
        board: &Board,
        status: &str,
    ) -> Result<MessageId, TransportError> {
        let markup = InlineKeyboardMarkup::from(Keyboard::for_board(board));
        match target {
            RenderTarget::New => Ok(self.send_message(chat, status, Some(markup)).await?.message_id),
            RenderTarget::Edit(message) => {
                self.edit_message_text(chat, message, status, Some(markup)).await?;
                Ok(message)
            }
        }
    }

    async fn acknowledge(&self, event_id: &str) -> Result<(), TransportError> {
        self.answer_callback_query(event_id, None, false).await
    }

    async fn reject_with_alert(&self, event_id: &str, message: &str) -> Result<(), TransportError> {
        self.answer_callback_query(event_id, Some(message), true).await
    }

    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.send_message(chat, text, None).await.map(|_| ())
    }
}
