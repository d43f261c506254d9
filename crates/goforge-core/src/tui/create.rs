//! Direct project creation session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::scaffold::Scaffolder;
use crate::templates::Template;
use crate::tui::event::{self, Action, AppEvent, EventRx, EventTx};
use crate::tui::widgets;

/// FSM step for the direct flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnterName,
    SelectTemplate,
    Creating,
    Done,
}

/// Session state for direct creation. Mutated only by [`CreateApp::on_event`],
/// one event at a time.
pub struct CreateApp {
    pub step: Step,
    pub input: String,
    pub project_name: String,
    pub cursor: usize,
    pub output: Vec<String>,
    pub error: Option<String>,
    /// Quit was requested while the operation was in flight; the session
    /// still waits for the terminal event (there is no cancellation).
    pub quit_requested: bool,
    templates: Vec<Arc<dyn Template>>,
}

impl CreateApp {
    /// A pre-supplied non-empty project name skips straight to template
    /// selection.
    pub fn new(templates: Vec<Arc<dyn Template>>, project_name: Option<String>) -> Self {
        let project_name = project_name.unwrap_or_default();
        let step = if project_name.is_empty() {
            Step::EnterName
        } else {
            Step::SelectTemplate
        };
        Self {
            step,
            input: project_name.clone(),
            project_name,
            cursor: 0,
            output: Vec::new(),
            error: None,
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
            AppEvent::Done(result) => {
                self.error = result.err();
                self.step = Step::Done;
                Action::Quit
            }
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
            (Step::EnterName, KeyCode::Enter) => {
                if !self.input.is_empty() {
                    self.project_name = self.input.clone();
                    self.step = Step::SelectTemplate;
                }
            }
            (Step::EnterName, KeyCode::Backspace) => {
                self.input.pop();
            }
            (Step::EnterName, KeyCode::Char(c)) => self.input.push(c),
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
            (Step::Done, _) => return Action::Quit,
            _ => {}
        }
        Action::None
    }
}

pub(super) fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn render(app: &CreateApp, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(frame.area());

    widgets::title(frame, chunks[0], "Goforge — Go Project Manager");

    match app.step {
        Step::EnterName => {
            widgets::input_prompt(frame, chunks[1], "Enter project name:", &app.input);
            widgets::help(frame, chunks[2], "Enter to continue · q to quit");
        }
        Step::SelectTemplate => {
            widgets::template_list(frame, chunks[1], app.templates(), app.cursor);
            widgets::help(frame, chunks[2], "↑/↓ navigate · Enter to select · q to quit");
        }
        Step::Creating => {
            widgets::output_box(frame, chunks[1], &app.output);
            let note = if app.quit_requested {
                "Quit requested, finishing the current operation…"
            } else {
                "Creating project…"
            };
            widgets::help(frame, chunks[2], note);
        }
        Step::Done => match &app.error {
            Some(e) => widgets::status(frame, chunks[1], &format!("✗ Error: {e}"), false),
            None => widgets::status(
                frame,
                chunks[1],
                &format!("✓ Project '{}' created successfully!", app.project_name),
                true,
            ),
        },
    }
}

/// Run the direct-creation session to completion.
pub async fn run(templates: Vec<Arc<dyn Template>>, project_name: Option<String>) -> Result<()> {
    let (tx, mut rx) = event::channel();
    event::spawn_key_reader(tx.clone());

    let mut app = CreateApp::new(templates, project_name);
    let mut terminal = super::setup_terminal()?;
    let looped = session_loop(&mut terminal, &mut app, &tx, &mut rx).await;
    super::restore_terminal(&mut terminal)?;
    looped?;

    match &app.error {
        Some(e) => anyhow::bail!("{e}"),
        None if app.step == Step::Done => {
            println!();
            println!(
                "{} Project '{}' created successfully!",
                "✓".green().bold(),
                app.project_name
            );
            println!();
            println!("  cd {} && go run .", app.project_name);
            println!();
            Ok(())
        }
        // Quit before anything was created.
        None => Ok(()),
    }
}

async fn session_loop(
    terminal: &mut super::Tui,
    app: &mut CreateApp,
    tx: &EventTx,
    rx: &mut EventRx,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        let Some(ev) = rx.recv().await else { break };
        match app.on_event(ev) {
            Action::None => {}
            Action::Dispatch => dispatch_create(app, tx.clone()),
            Action::OpenTerminal | Action::Quit => {
                terminal.draw(|frame| render(app, frame))?;
                break;
            }
        }
    }
    Ok(())
}

/// One unit of background work per session; only ever reached from the
/// SelectTemplate → Creating transition.
fn dispatch_create(app: &CreateApp, tx: EventTx) {
    let Some(template) = app.selected_template() else {
        return;
    };
    let name = app.project_name.clone();
    let sink = event::line_sink(tx.clone());
    tokio::spawn(async move {
        let target = PathBuf::from(&name);
        let result = Scaffolder::new()
            .create_project(template.as_ref(), &target, &name, Some(sink))
            .await
            .map(|_| target)
            .map_err(|e| e.to_string());
        let _ = tx.send(AppEvent::Done(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::builtin_templates;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> CreateApp {
        CreateApp::new(builtin_templates(), None)
    }

    #[test]
    fn name_entry_then_selection_then_creation() {
        let mut app = app();
        assert_eq!(app.step, Step::EnterName);

        assert_eq!(app.on_event(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(app.on_event(key(KeyCode::Enter)), Action::None);
        assert_eq!(app.step, Step::SelectTemplate);
        assert_eq!(app.project_name, "x");

        assert_eq!(app.on_event(key(KeyCode::Enter)), Action::Dispatch);
        assert_eq!(app.step, Step::Creating);

        for line in ["go: creating new go.mod", "go: module x", "done"] {
            assert_eq!(app.on_event(AppEvent::Output(line.to_string())), Action::None);
        }
        assert_eq!(
            app.on_event(AppEvent::Done(Ok(PathBuf::from("x")))),
            Action::Quit
        );
        assert_eq!(app.step, Step::Done);
        assert!(app.error.is_none());
        assert_eq!(
            app.output,
            vec!["go: creating new go.mod", "go: module x", "done"]
        );
    }

    #[test]
    fn failure_ends_in_a_failure_state() {
        let mut app = CreateApp::new(builtin_templates(), Some("y".to_string()));
        assert_eq!(app.step, Step::SelectTemplate);

        assert_eq!(app.on_event(key(KeyCode::Enter)), Action::Dispatch);
        assert_eq!(
            app.on_event(AppEvent::Done(Err("go exited with 1".to_string()))),
            Action::Quit
        );
        assert_eq!(app.step, Step::Done);
        assert_eq!(app.error.as_deref(), Some("go exited with 1"));
    }

    #[test]
    fn empty_name_does_not_advance() {
        let mut app = app();
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.step, Step::EnterName);
    }

    #[test]
    fn backspace_edits_the_input() {
        let mut app = app();
        app.on_event(key(KeyCode::Char('a')));
        app.on_event(key(KeyCode::Char('b')));
        app.on_event(key(KeyCode::Backspace));
        assert_eq!(app.input, "a");
    }

    #[test]
    fn cursor_is_clamped_to_the_catalog() {
        let mut app = CreateApp::new(builtin_templates(), Some("z".to_string()));
        let len = app.templates().len();

        app.on_event(key(KeyCode::Up));
        assert_eq!(app.cursor, 0);

        for _ in 0..len + 3 {
            app.on_event(key(KeyCode::Down));
        }
        assert_eq!(app.cursor, len - 1);
    }

    #[test]
    fn quit_during_creation_is_deferred() {
        let mut app = CreateApp::new(builtin_templates(), Some("z".to_string()));
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.step, Step::Creating);

        assert_eq!(app.on_event(key(KeyCode::Char('q'))), Action::None);
        assert!(app.quit_requested);
        assert_eq!(app.step, Step::Creating);

        assert_eq!(
            app.on_event(AppEvent::Done(Ok(PathBuf::from("z")))),
            Action::Quit
        );
    }

    #[test]
    fn quit_outside_creation_is_immediate() {
        let mut app = app();
        assert_eq!(app.on_event(key(KeyCode::Char('q'))), Action::Quit);
    }
}
