//! Chat messages and the append-only history.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who produced a message.
///
/// Serialized as a bare string (`"user"`, `"backend"`, or anything else
/// verbatim). The same string is used as the CSS class of the rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The remote endpoint that answered.
    Backend,
    /// Any other named sender.
    Other(String),
}

impl Sender {
    /// String form of the sender.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Backend => "backend",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Self::User,
            "backend" => Self::Backend,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Sender {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        match value {
            Sender::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single displayed message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    /// Create a message from any sender.
    pub fn new(sender: impl Into<Sender>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Reply from the backend.
    pub fn backend(text: impl Into<String>) -> Self {
        Self::new(Sender::Backend, text)
    }

    #[must_use]
    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only sequence of messages.
///
/// Entries are never removed or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    /// Append a message at the end.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }
}
