//! Temporary workspace creation session.
//!
//! Starts at template selection; naming the instance is an optional detour
//! behind Tab (an empty name gets a synthesized one). Success offers a
//! choice menu with "open a terminal in the new instance" before exit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::templates::Template;
use crate::tui::create::is_quit_key;
use crate::tui::event::{self, Action, AppEvent, EventRx, EventTx};
use crate::tui::widgets;
use crate::workspace::TempWorkspace;

const CHOICES: [&str; 2] = ["Open terminal in temp folder", "Exit"];

/// FSM step for the temp-workspace flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnterName,
    SelectTemplate,
    Creating,
    ChoiceMenu,
    Done,
}

/// Session state for temp creation. Mutated only by [`TempApp::on_event`].
pub struct TempApp {
    pub step: Step,
    pub input: String,
    /// Cursor over the template catalog, reused for the two-option choice
    /// menu after a successful creation.
    pub cursor: usize,
    pub output: Vec<String>,
    pub error: Option<String>,
    pub result_path: Option<PathBuf>,
    pub quit_requested: bool,
    templates: Vec<Arc<dyn Template>>,
}

impl TempApp {
    pub fn new(templates: Vec<Arc<dyn Template>>) -> Self {
        Self {
            step: Step::SelectTemplate,
            input: String::new(),
            cursor: 0,
            output: Vec::new(),
            error: None,
            result_path: None,
            quit_requested: false,
            templates,
        }
    }

    pub fn templates(&self) -> &[Arc<dyn Template>] {
        &self.templates
    }

    pub fn selected_template(&self) -> Option<Arc<dyn Template>> {
        self.templates.get(self.cursor).cloned()
    }

    pub fn on_event(&mut self, event: AppEvent) -> Action {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Output(line) => {
                self.output.push(line);
                Action::None
            }
            AppEvent::Done(result) => match result {
                Ok(path) => {
                    self.result_path = Some(path);
                    self.step = Step::ChoiceMenu;
                    self.cursor = 0;
                    Action::None
                }
                Err(e) => {
                    self.error = Some(e);
                    self.step = Step::Done;
                    Action::Quit
                }
            },
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Action {
        if is_quit_key(&key) {
            if self.step == Step::Creating {
                self.quit_requested = true;
                return Action::None;
            }
            return Action::Quit;
        }

        match (self.step, key.code) {
            // Name entry is optional; Enter returns to the template list
            // even with an empty input.
            (Step::EnterName, KeyCode::Enter) => self.step = Step::SelectTemplate,
            (Step::EnterName, KeyCode::Backspace) => {
                self.input.pop();
            }
            (Step::EnterName, KeyCode::Char(c)) => self.input.push(c),
            (Step::SelectTemplate, KeyCode::Tab) => self.step = Step::EnterName,
            (Step::SelectTemplate, KeyCode::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            (Step::SelectTemplate, KeyCode::Down) => {
                if self.cursor + 1 < self.templates.len() {
                    self.cursor += 1;
                }
            }
            (Step::SelectTemplate, KeyCode::Enter) => {
                if !self.templates.is_empty() {
                    self.step = Step::Creating;
                    return Action::Dispatch;
                }
            }
            (Step::ChoiceMenu, KeyCode::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            (Step::ChoiceMenu, KeyCode::Down) => {
                if self.cursor + 1 < CHOICES.len() {
                    self.cursor += 1;
                }
            }
            (Step::ChoiceMenu, KeyCode::Enter) => {
                return if self.cursor == 0 {
                    Action::OpenTerminal
                } else {
                    Action::Quit
                };
            }
            (Step::Done, _) => return Action::Quit,
            _ => {}
        }
        Action::None
    }
}

pub fn render(app: &TempApp, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(frame.area());

    widgets::title(frame, chunks[0], "Goforge — Temporary Code Workspace");

    match app.step {
        Step::EnterName => {
            widgets::input_prompt(
                frame,
                chunks[1],
                "Enter project name (leave empty for auto-generated):",
                &app.input,
            );
            widgets::help(frame, chunks[2], "Enter to continue · q to quit");
        }
        Step::SelectTemplate => {
            widgets::template_list(frame, chunks[1], app.templates(), app.cursor);
            widgets::help(
                frame,
                chunks[2],
                "↑/↓ navigate · Enter to create · Tab to set project name · q to quit",
            );
        }
        Step::Creating => {
            widgets::output_box(frame, chunks[1], &app.output);
            let note = if app.quit_requested {
                "Quit requested, finishing the current operation…"
            } else {
                "Creating temporary project…"
            };
            widgets::help(frame, chunks[2], note);
        }
        Step::ChoiceMenu => {
            widgets::choice_menu(frame, chunks[1], &CHOICES, app.cursor);
            widgets::help(frame, chunks[2], "↑/↓ navigate · Enter to select");
        }
        Step::Done => {
            if let Some(e) = &app.error {
                widgets::status(frame, chunks[1], &format!("✗ Error: {e}"), false);
            }
        }
    }
}

/// Run the temp-workspace session to completion.
pub async fn run(
    workspace: Arc<TempWorkspace>,
    templates: Vec<Arc<dyn Template>>,
) -> Result<()> {
    let (tx, mut rx) = event::channel();
    event::spawn_key_reader(tx.clone());

    let mut app = TempApp::new(templates);
    let mut terminal = super::setup_terminal()?;
    let looped = session_loop(&mut terminal, &mut app, workspace, &tx, &mut rx).await;
    super::restore_terminal(&mut terminal)?;
    let open_terminal = looped?;

    if let Some(e) = &app.error {
        anyhow::bail!("{e}");
    }

    if let Some(path) = &app.result_path {
        println!();
        println!(
            "{} Temporary project created at {}",
            "✓".green().bold(),
            path.display()
        );
        println!();
        if open_terminal {
            if let Err(e) = crate::terminal::open_in_directory(path) {
                eprintln!("{} {e}", "warning:".yellow());
            }
        }
    }

    Ok(())
}

/// Returns whether the user asked for a terminal in the created instance.
async fn session_loop(
    terminal: &mut super::Tui,
    app: &mut TempApp,
    workspace: Arc<TempWorkspace>,
    tx: &EventTx,
    rx: &mut EventRx,
) -> Result<bool> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        let Some(ev) = rx.recv().await else {
            return Ok(false);
        };
        match app.on_event(ev) {
            Action::None => {}
            Action::Dispatch => dispatch_create(app, Arc::clone(&workspace), tx.clone()),
            Action::OpenTerminal => {
                terminal.draw(|frame| render(app, frame))?;
                return Ok(true);
            }
            Action::Quit => {
                terminal.draw(|frame| render(app, frame))?;
                return Ok(false);
            }
        }
    }
}

fn dispatch_create(app: &TempApp, workspace: Arc<TempWorkspace>, tx: EventTx) {
    let Some(template) = app.selected_template() else {
        return;
    };
    let name = app.input.clone();
    let sink = event::line_sink(tx.clone());
    tokio::spawn(async move {
        let result = workspace
            .create(template.as_ref(), &name, Some(sink))
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(AppEvent::Done(result));
    });
}
