//! Page layout: transcript on top, input bar at the bottom.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Widget},
    Frame,
};

use crate::app::App;
use crate::widgets::{InputBar, TranscriptPane};

/// Fixed height for the input bar (in lines, including borders).
pub const INPUT_HEIGHT: u16 = 3;

/// Draw the whole page into a frame.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    render(app, area, frame.buffer_mut());
}

/// Render the page into `buf`, recording the transcript viewport first.
pub fn render(app: &mut App, area: Rect, buf: &mut Buffer) {
    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(INPUT_HEIGHT)]).areas(area);

    let inner = Block::default().borders(Borders::ALL).inner(transcript_area);
    app.transcript.set_viewport(inner.width, inner.height);

    TranscriptPane::new(&app.transcript, &app.theme).render(transcript_area, buf);
    InputBar::new(&app.input, &app.theme)
        .pending(app.in_flight.len())
        .render(input_area, buf);
}
