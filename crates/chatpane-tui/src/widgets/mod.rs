//! UI widgets for the chat page.
//!
//! This module provides:
//! - [`TranscriptPane`] - Scrollable message list
//! - [`InputBar`] - Bottom input field

mod input_bar;
mod transcript;

pub use input_bar::InputBar;
pub use transcript::TranscriptPane;
