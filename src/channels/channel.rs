//! Channel trait and the plain data exchanged with transports.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;

/// Stream of inbound events produced by a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingEvent> + Send>>;

/// An inbound event from a user.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingEvent {
    /// Channel name (e.g. "telegram", "cli").
    pub channel: String,
    /// Identifier of the user who produced the event.
    pub user_id: String,
    /// Conversation the event belongs to.
    pub chat_id: String,
    /// Optional public handle of the user.
    pub username: Option<String>,
    pub kind: EventKind,
}

impl IncomingEvent {
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        chat_id: impl Into<String>,
        kind: EventKind,
    ) -> Self {
        Self {
            channel: channel.into(),
            user_id: user_id.into(),
            chat_id: chat_id.into(),
            username: None,
            kind,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Message id a reply should edit, if the event came from a button.
    pub fn editable_message_id(&self) -> Option<i64> {
        match &self.kind {
            EventKind::Button { message_id, .. } => *message_id,
            _ => None,
        }
    }

    /// Callback id to acknowledge, if the event came from a button.
    pub fn callback_id(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Button { callback_id, .. } => Some(callback_id),
            _ => None,
        }
    }
}

/// Payload of an inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Slash command, name without the leading `/`.
    Command { name: String, args: String },
    /// Inline button press.
    Button {
        data: String,
        callback_id: String,
        message_id: Option<i64>,
    },
    /// Free text.
    Text(String),
    /// Geo point.
    Location { latitude: f64, longitude: f64 },
    /// Photo reference held by the transport.
    Photo {
        file_id: String,
        file_unique_id: String,
    },
}

/// A labelled action attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Rows of buttons.
pub type Keyboard = Vec<Vec<Button>>;

/// How message text should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Html,
}

/// A text message to send, or to edit in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextMessage {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub format: TextFormat,
    /// Edit this message instead of sending a new one.
    pub edit_message_id: Option<i64>,
}

impl TextMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Html,
            ..Default::default()
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn editing(mut self, message_id: Option<i64>) -> Self {
        self.edit_message_id = message_id;
        self
    }
}

/// A photo referenced by its transport file id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingPhoto {
    pub file_id: String,
    pub caption: Option<String>,
}

/// An outbound request to a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text(TextMessage),
    /// A single photo post.
    Photo(OutgoingPhoto),
    /// A grouped photo post.
    Album(Vec<OutgoingPhoto>),
}

impl From<TextMessage> for Outbound {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

/// A file downloaded from the transport.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    /// Path of the file on the transport side (used for its extension).
    pub path: String,
    pub bytes: Vec<u8>,
}

/// A message transport.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name for logging.
    fn name(&self) -> &str;

    /// Start receiving events.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Send an outbound request to a chat.
    async fn deliver(&self, chat_id: &str, outbound: Outbound) -> Result<(), ChannelError>;

    /// Acknowledge a button press, optionally with an alert.
    async fn acknowledge(&self, _callback_id: &str, _alert: Option<&str>) -> Result<(), ChannelError> {
        Ok(())
    }

    /// Download a file previously received from a user.
    async fn fetch_file(&self, _file_id: &str) -> Result<RemoteFile, ChannelError> {
        Err(ChannelError::Unsupported {
            name: self.name().to_string(),
            operation: "file download".into(),
        })
    }

    /// Check that the channel is usable.
    async fn health_check(&self) -> Result<(), ChannelError> {
        Ok(())
    }

    /// Stop the channel.
    async fn shutdown(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
