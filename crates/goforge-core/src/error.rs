//! Error taxonomy for the scaffolding engine.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// A subprocess could not be started, exited non-zero, or failed mid-flight.
///
/// The underlying tool's own diagnostics are not parsed; they reach the user
/// through the streamed output, not through this error.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}")]
    Failed { tool: String, status: ExitStatus },

    #[error("i/o error while waiting for '{tool}': {source}")]
    Wait {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// A scaffolding pipeline step failed. The pipeline aborts at the first
/// failing step and performs no cleanup of the partially created tree.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Temp workspace precondition violations and filesystem failures.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("temp project '{0}' does not exist")]
    NotFound(String),

    /// The promotion target is on a different filesystem; a rename cannot
    /// move the instance atomically. The engine never degrades the move
    /// into a copy+delete behind the caller's back.
    #[error(
        "cannot move '{name}' across filesystems; copy it to the target and \
         delete the original instead: {source}"
    )]
    CrossDevice {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration store failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to resolve user home directory")]
    NoHome,

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
