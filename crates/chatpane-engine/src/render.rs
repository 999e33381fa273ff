//! Appending messages to a view.

use crate::message::{Message, Sender};
use crate::view::MessageView;

/// Append a message from `sender` and scroll the view to it.
///
/// The text is stored as-is; views must display it literally.
pub fn render<V>(view: &mut V, sender: Sender, text: impl Into<String>)
where
    V: MessageView + ?Sized,
{
    view.append(Message::new(sender, text));
    view.scroll_to_bottom();
}
