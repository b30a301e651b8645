//! Platform-neutral bot layer.
//!
//! Adapters (Telegram, console) turn their own updates into [`Inbound`]
//! events and implement [`Transport`] for the replies. [`GameBot`] sits in
//! between and owns the sessions. [`ChatDispatcher`] runs events in the
//! background without reordering any one chat's events.

mod dispatch;
mod event;
mod handler;
mod keyboard;
pub mod status;
mod transport;

pub use dispatch::ChatDispatcher;
pub use event::{ChatId, Inbound, MessageId, RenderTarget};
pub use handler::GameBot;
pub use keyboard::{KeyButton, Keyboard};
pub use transport::{Transport, TransportError};
