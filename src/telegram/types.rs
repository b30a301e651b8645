//! Bot API wire types.
//!
//! Only the fields this bot reads or writes are modelled; serde ignores the
//! rest.

use crate::bot::{ChatId, Keyboard, MessageId, TransportError};
use serde::{Deserialize, Serialize};

/// Envelope around every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Payload on success.
    pub result: Option<T>,
    /// Human-readable error on failure.
    pub description: Option<String>,
    /// Error code on failure.
    pub error_code: Option<i32>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload of a successful call to `method`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] carrying the API's description when `ok`
    /// is false or the payload is missing.
    pub fn into_result(self, method: &str) -> Result<T, TransportError> {
        match self {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                description, error_code, ..
            } => {
                let description = description.unwrap_or_else(|| "no description".to_string());
                Err(TransportError::new(format!("{method} failed ({error_code:?}): {description}")))
            }
        }
    }
}

/// One incoming update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update id, used as the polling offset.
    pub update_id: i64,
    /// New message, if this is a message update.
    pub message: Option<Message>,
    /// Button tap, if this is a callback update.
    pub callback_query: Option<CallbackQuery>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message id within the chat.
    pub message_id: MessageId,
    /// Chat the message belongs to.
    pub chat: Chat,
    /// Sender, absent for channel posts.
    pub from: Option<User>,
    /// Text content.
    pub text: Option<String>,
}

/// A chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat id.
    pub id: ChatId,
}

/// A user or bot.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User id.
    pub id: i64,
    /// Whether this is a bot account.
    #[serde(default)]
    pub is_bot: bool,
    /// First name.
    pub first_name: String,
    /// Username without the leading `@`.
    pub username: Option<String>,
}

/// A tap on an inline keyboard button.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Query id, answered with `answerCallbackQuery`.
    pub id: String,
    /// Who tapped.
    pub from: User,
    /// Message carrying the keyboard.
    pub message: Option<Message>,
    /// The button's callback data.
    pub data: Option<String>,
}

/// Inline keyboard attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Button rows.
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    /// Label.
    pub text: String,
    /// Data sent back in the callback query.
    pub callback_data: String,
}

impl From<Keyboard> for InlineKeyboardMarkup {
    fn from(keyboard: Keyboard) -> Self {
        Self {
            inline_keyboard: keyboard
                .into_rows()
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|button| InlineKeyboardButton {
                            text: button.label,
                            callback_data: button.callback_data,
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

/// Update kinds the bot subscribes to.
pub const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// `getUpdates` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdates {
    /// First update id to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Long-polling timeout in seconds.
    pub timeout: u64,
    /// Update kinds to receive.
    pub allowed_updates: &'static [&'static str],
}

impl GetUpdates {
    /// Long-poll request for messages and button taps.
    pub fn long_poll(offset: Option<i64>, timeout: u64) -> Self {
        Self {
            offset,
            timeout,
            allowed_updates: &ALLOWED_UPDATES,
        }
    }
}

/// `sendMessage` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
    /// Target chat.
    pub chat_id: ChatId,
    /// Text.
    pub text: &'a str,
    /// Keyboard to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// `editMessageText` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageText<'a> {
    /// Chat holding the message.
    pub chat_id: ChatId,
    /// Message to edit.
    pub message_id: MessageId,
    /// New text.
    pub text: &'a str,
    /// New keyboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// `answerCallbackQuery` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    /// Query being answered.
    pub callback_query_id: &'a str,
    /// Notification text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    /// Show as a modal alert instead of a toast.
    pub show_alert: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Board;

    #[test]
    fn test_parse_callback_update() {
        let json = r#"{
            "update_id": 10,
            "callback_query": {
                "id": "4382",
                "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
                "message": {
                    "message_id": 55,
                    "date": 1700000000,
                    "chat": {"id": -100, "type": "private"},
                    "text": "Your move (X)"
                },
                "chat_instance": "abc",
                "data": "12"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("12"));
        let message = query.message.unwrap();
        assert_eq!(message.message_id, MessageId(55));
        assert_eq!(message.chat.id, ChatId(-100));
    }

    #[test]
    fn test_markup_serializes_tokens() {
        let markup = InlineKeyboardMarkup::from(Keyboard::for_board(&Board::new()));
        let value = serde_json::to_value(&markup).unwrap();
        assert_eq!(value["inline_keyboard"][0][0]["text"], ".");
        assert_eq!(value["inline_keyboard"][2][2]["callback_data"], "22");
    }

    #[test]
    fn test_error_response() {
        let json = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert_eq!(response.error_code, Some(400));

        let err = response.into_result("sendMessage").unwrap_err();
        assert!(err.message.contains("sendMessage"));
        assert!(err.message.contains("400"));
        assert!(err.message.contains("chat not found"));
    }

    #[test]
    fn test_success_response_yields_result() {
        let json = r#"{"ok": true, "result": true}"#;
        let response: ApiResponse<bool> = serde_json::from_str(json).unwrap();
        assert!(response.into_result("answerCallbackQuery").unwrap());
    }

    #[test]
    fn test_ok_without_result_is_an_error() {
        let json = r#"{"ok": true}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        let err = response.into_result("getUpdates").unwrap_err();
        assert!(err.message.contains("no description"));
    }

    #[test]
    fn test_long_poll_subscribes_to_messages_and_taps() {
        let value = serde_json::to_value(GetUpdates::long_poll(Some(42), 30)).unwrap();
        assert_eq!(value["offset"], 42);
        assert_eq!(value["timeout"], 30);
        assert_eq!(value["allowed_updates"], serde_json::json!(["message", "callback_query"]));

        let first = serde_json::to_value(GetUpdates::long_poll(None, 30)).unwrap();
        assert!(first.get("offset").is_none());
    }
}
