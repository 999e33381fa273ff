//! Catppuccin Mocha color palette for the chat page.

use chatpane_engine::Sender;
use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,

    // Foregrounds
    pub text: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Sender attribution
    pub user: Color,
    pub assistant: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46), // #1e1e2e

            text: Color::Rgb(205, 214, 244), // #cdd6f4
            muted: Color::Rgb(108, 112, 134), // #6c7086

            primary: Color::Rgb(180, 190, 254), // #b4befe (lavender)

            user: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
            assistant: Color::Rgb(250, 179, 135), // #fab387 (peach)

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Terminal default colors only.
    pub fn plain() -> Self {
        Self {
            base: Color::Reset,
            text: Color::Reset,
            muted: Color::Reset,
            primary: Color::Reset,
            user: Color::Reset,
            assistant: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
        }
    }

    /// Pick a theme from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::plain()
        } else {
            Self::mocha()
        }
    }

    /// Color used for a sender's label.
    pub fn sender_color(&self, sender: Sender) -> Color {
        match sender {
            Sender::User => self.user,
            Sender::Assistant => self.assistant,
        }
    }

    /// Style for a sender's label line.
    pub fn sender_label(&self, sender: Sender) -> Style {
        Style::default()
            .fg(self.sender_color(sender))
            .add_modifier(Modifier::BOLD)
    }
}
