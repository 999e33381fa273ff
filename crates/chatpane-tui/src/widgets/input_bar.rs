//! Full-width input bar widget.
//!
//! Always visible at the bottom of the screen for text entry. While replies
//! are outstanding the border title shows a waiting hint; typing stays
//! enabled.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::input::InputState;
use crate::text::{tail_to_width, visual_width};
use crate::theme::Theme;

/// Prompt drawn before the input text.
const PROMPT: &str = "> ";

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a InputState,
    theme: &'a Theme,
    pending: usize,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a InputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            pending: 0,
        }
    }

    /// Set how many replies are still outstanding.
    #[must_use]
    pub fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    /// Build the single input line, keeping the cursor in view.
    fn build_line(&self, width: usize) -> Line<'static> {
        let prompt = Span::styled(PROMPT, Style::default().fg(self.theme.primary));
        let text_style = Style::default().fg(self.theme.text);
        let focused = self.input.is_focused();

        if self.input.is_empty() && !focused {
            return Line::from(vec![
                prompt,
                Span::styled("Type a message...", Style::default().fg(self.theme.muted)),
            ]);
        }

        let (before, after) = self.input.split_at_cursor();
        // Prompt plus one cell for the cursor.
        let room = width.saturating_sub(visual_width(PROMPT) + 1);
        let before = tail_to_width(before, room);
        let after_room = room.saturating_sub(visual_width(before));

        let mut spans = vec![prompt, Span::styled(before.to_string(), text_style)];
        if focused {
            spans.push(Span::styled("█", text_style));
        }
        let after: String = after
            .chars()
            .scan(0, |used, ch| {
                *used += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
                (*used <= after_room).then_some(ch)
            })
            .collect();
        spans.push(Span::styled(after, text_style));

        Line::from(spans)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.input.is_focused() {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.pending > 0 {
            let hint = if self.pending == 1 {
                " ● Waiting for reply... ".to_string()
            } else {
                format!(" ● Waiting for {} replies... ", self.pending)
            };
            block = block.title(Span::styled(hint, Style::default().fg(self.theme.muted)));
        }

        let inner = block.inner(area);
        let line = self.build_line(usize::from(inner.width));

        Paragraph::new(line).block(block).render(area, buf);
    }
}
