//! Interactive sessions.
//!
//! One single-threaded event loop per session owns all state mutation and
//! rendering. Blocking work (subprocesses, bulk filesystem operations) runs
//! as one spawned task per session and reports back only through the event
//! queue in [`event`].

pub mod create;
pub mod event;
pub mod temp;
mod widgets;

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub(crate) type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub(crate) fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
