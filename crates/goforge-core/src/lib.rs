//! Goforge Core - engine for bootstrapping Go projects from templates
//!
//! This library carries the scaffolding engine shared by the `goforge`
//! binary:
//!
//! - **Command runner** — one external tool invocation with both output
//!   streams drained concurrently and forwarded line-by-line to a sink.
//! - **Scaffolding pipeline** — directory creation, `go mod init`, template
//!   file materialization, sequential `go get` per dependency, `go mod tidy`.
//! - **Temp workspace manager** — disposable project instances under a
//!   configured root, with sidecar metadata and promotion to permanent
//!   locations.
//! - **Interactive sessions** (feature `tui`, on by default) — ratatui
//!   state machines driving the above off the render loop.
//!
//! The template catalog is an explicit constructed collection
//! ([`templates::builtin_templates`]); nothing self-registers at load time.

pub mod config;
pub mod error;
pub mod runner;
pub mod scaffold;
pub mod templates;
pub mod terminal;
pub mod workspace;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ConfigError, ExecError, ScaffoldError, WorkspaceError};
pub use runner::{run_tool, LineSink};
pub use scaffold::Scaffolder;
pub use templates::{builtin_templates, find_template, Template};
pub use workspace::{TempProjectMeta, TempWorkspace};
