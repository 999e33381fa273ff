//! Handles the controller and renderer operate on.
//!
//! Front ends implement these for their widgets and pass them in
//! explicitly; nothing in the engine looks a view up on its own.

use crate::message::Message;

/// The text field the user types into.
pub trait InputField {
    /// Current raw content.
    fn value(&self) -> &str;

    /// Remove all content.
    fn clear(&mut self);

    /// Give the field keyboard focus.
    fn focus(&mut self);
}

/// The scrollable container messages are appended to.
pub trait MessageView {
    /// Append a message after all existing ones.
    fn append(&mut self, message: Message);

    /// Scroll so the newest message is visible.
    fn scroll_to_bottom(&mut self);
}

/// In-memory view, used by the one-shot CLI and by tests.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
    scrolled_to_bottom: bool,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in the order they were appended.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the last operation left the log scrolled to its newest message.
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scrolled_to_bottom
    }
}

impl MessageView for MessageLog {
    fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scrolled_to_bottom = false;
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolled_to_bottom = true;
    }
}

/// Input field backed by a plain string.
#[derive(Debug, Default, Clone)]
pub struct TextField {
    value: String,
    focused: bool,
}

impl TextField {
    /// Create a field holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            focused: false,
        }
    }

    /// Replace the content.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Whether the field currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl InputField for TextField {
    fn value(&self) -> &str {
        &self.value
    }

    fn clear(&mut self) {
        self.value.clear();
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
