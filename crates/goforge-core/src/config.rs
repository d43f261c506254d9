//! User configuration: `~/.goforge/goforge.json`.
//!
//! The file holds one recognized field, the temp workspace root. It is
//! written once with an exclusive create and never overwritten; edit or
//! delete it to change the root.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_DIR_NAME: &str = ".goforge";
const CONFIG_FILE_NAME: &str = "goforge.json";

/// Overrides the config directory entirely. Used by tests and CI.
pub const HOME_ENV: &str = "GOFORGE_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub temp_dir: PathBuf,
}

impl Config {
    fn default_in(config_dir: &Path) -> Self {
        Self {
            temp_dir: config_dir.join("tmp"),
        }
    }
}

/// Full path to the config directory (`$GOFORGE_HOME` or `~/.goforge`).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Full path to the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Read and parse the config file.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_file_path()?;
    let data = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
}

/// Ensure the config directory, config file, and temp root all exist.
/// Safe to call repeatedly; an existing config file is left untouched.
pub fn ensure() -> Result<Config, ConfigError> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::Write {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(CONFIG_FILE_NAME);
    match std::fs::File::create_new(&path) {
        Ok(mut file) => {
            let cfg = Config::default_in(&dir);
            let data =
                serde_json::to_string_pretty(&cfg).map_err(|source| ConfigError::Write {
                    path: path.clone(),
                    source: source.into(),
                })?;
            file.write_all(data.as_bytes())
                .map_err(|source| ConfigError::Write {
                    path: path.clone(),
                    source,
                })?;
        }
        // Someone else won the race or the file predates us; keep theirs.
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
        Err(source) => {
            return Err(ConfigError::Write {
                path: path.clone(),
                source,
            })
        }
    }

    let cfg = load()?;
    std::fs::create_dir_all(&cfg.temp_dir).map_err(|source| ConfigError::Write {
        path: cfg.temp_dir.clone(),
        source,
    })?;

    Ok(cfg)
}

/// Resolve the temp workspace root, creating the config on first use.
pub fn resolve_temp_root() -> Result<PathBuf, ConfigError> {
    Ok(ensure()?.temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // All cases share one test because they mutate process-wide env state.
    #[test]
    fn ensure_is_idempotent_and_never_clobbers() {
        let tmp = TempDir::new().unwrap();
        std::env::set_var(HOME_ENV, tmp.path());

        let cfg = ensure().unwrap();
        assert_eq!(cfg.temp_dir, tmp.path().join("tmp"));
        assert!(cfg.temp_dir.is_dir());
        assert!(tmp.path().join(CONFIG_FILE_NAME).is_file());

        // A hand-edited config survives subsequent ensure() calls.
        let custom = tmp.path().join("elsewhere");
        let custom_cfg = Config {
            temp_dir: custom.clone(),
        };
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            serde_json::to_string_pretty(&custom_cfg).unwrap(),
        )
        .unwrap();

        let cfg = ensure().unwrap();
        assert_eq!(cfg.temp_dir, custom);
        assert!(custom.is_dir());

        std::env::remove_var(HOME_ENV);
    }
}
