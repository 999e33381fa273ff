//! Application state for the chat page.

use chatpane_engine::{ChatController, InFlight, InputField};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::event::{key_to_action, Action};
use crate::input::InputState;
use crate::theme::Theme;
use crate::transcript::{Transcript, SCROLL_SPEED};
use crate::trigger::SendTrigger;

/// The chat page: one input field, one transcript, and the requests in flight.
#[derive(Debug)]
pub struct App {
    /// Enter-to-send binding.
    trigger: SendTrigger,
    /// The input field.
    pub input: InputState,
    /// The message container.
    pub transcript: Transcript,
    /// Requests whose replies have not been rendered yet.
    pub in_flight: InFlight,
    /// Theme colors.
    pub theme: Theme,
    /// Should the app quit?
    pub should_quit: bool,
}

impl App {
    /// Create the page and register the send trigger for `controller`.
    pub fn new(controller: ChatController, theme: Theme) -> Self {
        Self {
            trigger: SendTrigger::register(controller),
            input: InputState::new(),
            transcript: Transcript::new(),
            in_flight: InFlight::new(),
            theme,
            should_quit: false,
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.trigger.handle_key(
            &key,
            &mut self.input,
            &mut self.transcript,
            &mut self.in_flight,
        ) {
            return;
        }

        if self.edit_input(key) {
            return;
        }

        self.handle_action(key_to_action(key));
    }

    /// Apply an editing key to the input field.
    /// Returns true if the key was handled.
    fn edit_input(&mut self, key: KeyEvent) -> bool {
        // Leave Ctrl+C and friends to the action handler
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        true
    }

    /// Handle a page-level action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp => self.transcript.scroll_up(1),
            Action::ScrollDown => self.transcript.scroll_down(1),
            Action::PageUp => self.transcript.scroll_up(self.transcript.page()),
            Action::PageDown => self.transcript.scroll_down(self.transcript.page()),
            Action::None => {}
        }
    }

    /// Handle a mouse event (wheel scrolling only).
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.transcript.scroll_up(SCROLL_SPEED),
            MouseEventKind::ScrollDown => self.transcript.scroll_down(SCROLL_SPEED),
            _ => {}
        }
    }

    /// Track terminal focus so the input bar shows whether it takes keys.
    pub fn handle_focus(&mut self, focused: bool) {
        if focused {
            self.input.focus();
        } else {
            self.input.blur();
        }
    }

    /// Render replies for every request that has finished.
    pub async fn poll_replies(&mut self) -> usize {
        self.in_flight.render_finished(&mut self.transcript).await
    }

    /// Abort outstanding requests.
    pub fn shutdown(&mut self) {
        self.in_flight.abort_all();
    }
}
