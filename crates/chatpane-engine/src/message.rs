//! Message types for the chat transcript.
//!
//! A message is created at render time and handed to the view that displays
//! it. Messages carry no identity and are never mutated after creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reply the server sends while it is still working on a request.
///
/// It is rendered verbatim like any other reply.
pub const WAITING_REPLY: &str = "⏳ Waiting for response...";

/// Assistant text shown when a request or its decoding fails.
pub const FALLBACK_REPLY: &str = "⚠️ Oops! Something went wrong. Please try again.";

/// Origin of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed locally.
    User,
    /// Returned by the chat server.
    Assistant,
}

impl Sender {
    /// Stable lowercase name, used to pick a visual style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Human-readable label shown above the message text.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who sent the message.
    pub sender: Sender,
    /// Literal message text.
    pub text: String,
}

impl Message {
    /// Create a message from any sender.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Style class for this message, e.g. `message user`.
    pub fn class_name(&self) -> String {
        format!("message {}", self.sender)
    }
}
