//! Event plumbing for interactive sessions.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::runner::LineSink;

/// Events applied by a session loop, one at a time. Background work only
/// ever communicates by enqueueing these; it never touches session state.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    /// One line of subprocess output.
    Output(String),
    /// Terminal event of the single in-flight operation; errors are
    /// flattened to display strings at the task boundary.
    Done(Result<PathBuf, String>),
}

/// What the session loop should do after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// Dispatch exactly one unit of background work.
    Dispatch,
    /// Launch a terminal in the created project, then end the session.
    OpenTerminal,
    Quit,
}

pub type EventTx = mpsc::UnboundedSender<AppEvent>;
pub type EventRx = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventTx, EventRx) {
    mpsc::unbounded_channel()
}

/// Bridge the runner's line sink into the event queue.
pub fn line_sink(tx: EventTx) -> LineSink {
    Arc::new(move |line| {
        let _ = tx.send(AppEvent::Output(line));
    })
}

/// Pump crossterm key presses into the queue. The task ends once the
/// session loop drops its receiver.
pub fn spawn_key_reader(tx: EventTx) {
    tokio::task::spawn_blocking(move || loop {
        match crossterm::event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if tx.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}
