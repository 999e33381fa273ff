//! Transcript pane widget.
//!
//! ```text
//! ┌─ Chat ───────────────────────────────┐
//! │ You                                  │
//! │ Can you move my 3pm?                 │
//! │                                      │
//! │ Assistant                            │
//! │ ⏳ Waiting for response...           │
//! └──────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::transcript::Transcript;

/// Placeholder shown before the first message.
const EMPTY_HINT: &str = "Say something to start the conversation.";

/// Renders a [`Transcript`] at its current scroll offset.
pub struct TranscriptPane<'a> {
    transcript: &'a Transcript,
    theme: &'a Theme,
}

impl<'a> TranscriptPane<'a> {
    /// Create a new transcript pane.
    pub fn new(transcript: &'a Transcript, theme: &'a Theme) -> Self {
        Self { transcript, theme }
    }

    /// Build the `height` lines starting at line `offset` at `width`.
    ///
    /// Messages are walked lazily so only the visible window is styled.
    fn build_lines(&self, width: usize, offset: usize, height: usize) -> Vec<Line<'static>> {
        let text_style = Style::default().fg(self.theme.text);

        self.transcript
            .messages()
            .iter()
            .enumerate()
            .flat_map(|(idx, message)| {
                let separator = (idx > 0).then(Line::default);
                let label = Line::from(Span::styled(
                    message.sender.label(),
                    self.theme.sender_label(message.sender),
                ));
                let body = Transcript::body_lines(message, width)
                    .into_iter()
                    .map(move |line| Line::from(Span::styled(line, text_style)));
                separator.into_iter().chain(std::iter::once(label)).chain(body)
            })
            .skip(offset)
            .take(height)
            .collect()
    }
}

impl Widget for TranscriptPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Chat ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.transcript.is_empty() {
            Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(self.theme.muted))
                .render(inner, buf);
            return;
        }

        let lines = self.build_lines(
            usize::from(inner.width),
            self.transcript.scroll_offset(),
            usize::from(inner.height),
        );

        Paragraph::new(lines).render(inner, buf);
    }
}
