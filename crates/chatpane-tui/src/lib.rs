//! chatpane-tui: Terminal chat page for chatpane
//!
//! This crate provides the terminal front end, including:
//! - Input bar and transcript widgets
//! - The Enter-to-send trigger binding
//! - The event loop that renders replies as they resolve

mod app;
mod event;
mod input;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod transcript;
mod trigger;
mod ui;
mod widgets;

pub use chatpane_engine;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use input::InputState;
pub use theme::Theme;
pub use transcript::Transcript;
pub use trigger::SendTrigger;

use chatpane_engine::{ChatController, Config, HttpTransport};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the chat page.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on every exit path.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpTransport::from_config(config)?;
    info!(url = transport.url(), "starting chat page");
    let controller = ChatController::new(transport);

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, Theme::from_env());
    let mut events = EventHandler::new(config.tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Focus(focused) => app.handle_focus(focused),
                // Replies are polled below on every iteration; resize is
                // picked up by the next draw.
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        app.poll_replies().await;

        if app.should_quit {
            app.shutdown();
            break;
        }
    }

    info!("chat page closed");
    Ok(())
}
