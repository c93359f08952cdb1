//! Terminal host for the dialog, using ratatui
//!
//! The terminal plays the part of the page: it owns a [`MemoryDocument`] with
//! the dialog markup, shows whatever the controller puts into it, and feeds
//! key and mouse input back as host events until the request settles.

mod app;
mod events;
mod keys;
mod styles;

pub use app::{App, Focus, HitAreas};
pub use events::{Event, EventHandler};
pub use keys::{KeyAction, KeyMap};

use crate::config::Config;
use crate::dialog::{DialogController, DialogOptions, DialogResult, PendingDialog};
use crate::document::MemoryDocument;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Set while the terminal is in raw mode on the alternate screen
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    TERMINAL_ACTIVE.store(false, Ordering::SeqCst);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Best-effort restore for panic paths, where the `Terminal` is out of reach
///
/// Returns true when the terminal was active and has been reset.
pub fn reset_terminal() -> bool {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return false;
    }
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    true
}

/// Show one dialog in the terminal and wait for the user's answer
pub async fn run(config: &Config, options: DialogOptions) -> Result<DialogResult<bool>> {
    let document = Arc::new(MemoryDocument::with_dialog_markup(&config.selectors));
    let controller = DialogController::attach(document.clone(), &config.selectors);

    let mut pending = controller.open(options);
    if let Some(result) = pending.try_result() {
        return Ok(result);
    }

    let mut app = App::new(controller, document, config);
    let mut terminal = init_terminal(!config.disable_mouse)?;
    let mut event_handler = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &mut event_handler, &mut pending).await;

    restore_terminal(&mut terminal)?;
    result
}

/// Main loop: draw, route input, stop once the request settles
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    event_handler: &mut EventHandler,
    pending: &mut PendingDialog,
) -> Result<DialogResult<bool>> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        let event = event_handler.next().await?;
        app.handle_event(event);

        if let Some(result) = pending.try_result() {
            info!("Dialog settled: {:?}", result);
            return Ok(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_is_noop_when_inactive() {
        assert!(!reset_terminal());
    }
}
