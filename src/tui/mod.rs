//! Interactive terminal picker.

pub mod app;
pub mod event;
pub mod surface;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::App;

use crate::error::Result;

/// Raw mode and the alternate screen, undone on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).inspect_err(|_| teardown_terminal())?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).inspect_err(|_| teardown_terminal())?;
        terminal.hide_cursor().inspect_err(|_| teardown_terminal())?;
        terminal.clear().inspect_err(|_| teardown_terminal())?;

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

/// Run the picker until the operator quits or the antenna goes away.
pub fn run(mut app: App, tick_rate: Duration) -> Result<()> {
    let mut session = TerminalSession::enter()?;

    while !app.should_quit {
        session.terminal.draw(|frame| ui::render(&mut app, frame))?;
        event::handle_events(&mut app, tick_rate)?;
        app.check_closed();
    }

    tracing::info!(selection = %app.target_label(), "Picker finished");
    Ok(())
}
