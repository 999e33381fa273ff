//! Transcript state: the message container.
//!
//! Scrolling is measured in wrapped lines. The viewport size is recorded at
//! draw time so the maximum scroll position is known between draws.

use chatpane_engine::{Message, MessageView};

use crate::text::{sanitize_literal, wrap_text};

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Scrollable, append-only list of messages.
#[derive(Debug, Default)]
pub struct Transcript {
    /// All messages in chronological order.
    messages: Vec<Message>,
    /// Index of the first visible line when not pinned.
    scroll: usize,
    /// Whether the view follows the newest message.
    pinned: bool,
    /// Inner width of the pane at the last draw.
    width: u16,
    /// Inner height of the pane at the last draw.
    height: u16,
}

impl Transcript {
    /// Create an empty transcript that follows new messages.
    pub fn new() -> Self {
        Self {
            pinned: true,
            ..Self::default()
        }
    }

    /// All messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Check if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.scroll = 0;
        self.pinned = true;
    }

    /// Record the drawable area of the pane.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Width messages are wrapped to.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Wrapped lines of one message body.
    pub fn body_lines(message: &Message, width: usize) -> Vec<String> {
        wrap_text(&sanitize_literal(&message.text), width)
    }

    /// Total number of lines at the current width.
    ///
    /// Each message is a label line plus its body, with one blank line
    /// between messages.
    pub fn line_count(&self) -> usize {
        let width = usize::from(self.width);
        let body: usize = self
            .messages
            .iter()
            .map(|m| 1 + Self::body_lines(m, width).len())
            .sum();
        body + self.messages.len().saturating_sub(1)
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(usize::from(self.height))
    }

    /// Offset of the first visible line.
    pub fn scroll_offset(&self) -> usize {
        if self.pinned {
            self.max_scroll()
        } else {
            self.scroll.min(self.max_scroll())
        }
    }

    /// Whether the view follows the newest message.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Scroll towards older messages. Releases the pin.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll_offset().saturating_sub(lines);
        self.pinned = false;
    }

    /// Scroll towards newer messages. Re-pins at the bottom.
    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.max_scroll();
        self.scroll = (self.scroll_offset() + lines).min(max);
        self.pinned = self.scroll == max;
    }

    /// Lines in one page.
    pub fn page(&self) -> usize {
        usize::from(self.height.max(1))
    }
}

impl MessageView for Transcript {
    fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn scroll_to_bottom(&mut self) {
        self.pinned = true;
        self.scroll = self.max_scroll();
    }
}
