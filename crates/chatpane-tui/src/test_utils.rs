//! Test utilities for chatpane-tui rendering and interaction tests.
//!
//! This module provides helper functions for creating test terminals and
//! apps, driving them with key events, and converting buffers to strings.

use std::time::Duration;

use async_trait::async_trait;
use chatpane_engine::{ChatController, ChatResponse, ChatTransport, TransportError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

use crate::app::App;
use crate::theme::Theme;
use crate::ui;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Transport that answers every message with the same outcome.
pub struct FixedTransport {
    reply: Option<String>,
}

impl FixedTransport {
    /// Always reply with `reply`.
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    /// Always fail as if the body were not JSON.
    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl ChatTransport for FixedTransport {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(TransportError::Decode(
                serde_json::from_str::<ChatResponse>("<html>").unwrap_err(),
            )),
        }
    }
}

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app sending through `transport`.
pub fn create_test_app(transport: impl ChatTransport + 'static) -> App {
    let mut app = App::new(ChatController::new(transport), Theme::default());
    // Give the transcript a viewport as a first draw would.
    let _ = render_app_to_string(&mut app);
    app
}

/// Plain key press without modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Type `text` into the app one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

/// Poll the app until `count` replies have been rendered.
pub async fn wait_for_replies(app: &mut App, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        let mut rendered = 0;
        while rendered < count {
            rendered += app.poll_replies().await;
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("replies did not arrive in time");
}

/// Convert a buffer to a string representation for assertions.
///
/// Rows are joined with newlines and trailing spaces are trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the page to a buffer and return it as a string.
pub fn render_app_to_string(app: &mut App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    ui::render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app_has_viewport() {
        let app = create_test_app(FixedTransport::new("x"));
        assert_eq!(app.transcript.width(), TEST_WIDTH - 2);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
