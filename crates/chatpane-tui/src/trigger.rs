//! Binding between the Enter key and the send controller.

use chatpane_engine::{ChatController, InFlight, InputField, MessageView};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::debug;

/// Enter-to-send binding for the input field.
///
/// Created once with [`SendTrigger::register`]; every key event from the
/// input field is then offered to [`SendTrigger::handle_key`].
#[derive(Debug, Clone)]
pub struct SendTrigger {
    controller: ChatController,
}

impl SendTrigger {
    /// Bind the Enter key to `controller`.
    pub fn register(controller: ChatController) -> Self {
        debug!("send trigger registered");
        Self { controller }
    }

    /// Whether `key` is the send key.
    pub fn is_trigger(key: &KeyEvent) -> bool {
        key.code == KeyCode::Enter && key.kind != KeyEventKind::Release
    }

    /// Invoke the controller if `key` is the send key.
    ///
    /// Returns `true` when the key was consumed, whether or not anything
    /// was sent. Requires a running tokio runtime.
    pub fn handle_key<I, V>(
        &self,
        key: &KeyEvent,
        input: &mut I,
        view: &mut V,
        in_flight: &mut InFlight,
    ) -> bool
    where
        I: InputField + ?Sized,
        V: MessageView + ?Sized,
    {
        if !Self::is_trigger(key) {
            return false;
        }
        if let Some(pending) = self.controller.submit(input, view) {
            in_flight.push(pending);
        }
        true
    }
}
