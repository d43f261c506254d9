//! Temporary project workspace.
//!
//! Disposable project instances live as immediate children of a configured
//! root directory. Instance identity is the child directory name. Each
//! instance carries a JSON sidecar describing it; the sidecar is
//! best-effort on write and tolerated when missing or malformed on read.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::WorkspaceError;
use crate::runner::LineSink;
use crate::scaffold::Scaffolder;
use crate::templates::Template;

/// Sidecar file name inside each instance directory.
pub const META_FILE: &str = ".goforge_meta.json";

/// Persisted description of one temp instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempProjectMeta {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub template: String,
    pub path: PathBuf,
}

/// Manages temp project instances under one workspace root.
pub struct TempWorkspace {
    root: PathBuf,
    scaffolder: Scaffolder,
}

impl TempWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scaffolder: Scaffolder::new(),
        }
    }

    pub fn with_scaffolder(root: impl Into<PathBuf>, scaffolder: Scaffolder) -> Self {
        Self {
            root: root.into(),
            scaffolder,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root must exist before any instance operation; created lazily.
    async fn ensure_root(&self) -> Result<(), WorkspaceError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| WorkspaceError::Io {
                action: "create",
                path: self.root.clone(),
                source,
            })
    }

    /// Create a temp instance from `template`. An empty `name` gets a
    /// time-based one. Returns the created instance path.
    ///
    /// The metadata sidecar is written best-effort after scaffolding: a
    /// write failure is logged and swallowed because the instance is
    /// already usable.
    pub async fn create(
        &self,
        template: &dyn Template,
        name: &str,
        sink: Option<LineSink>,
    ) -> Result<PathBuf, WorkspaceError> {
        self.ensure_root().await?;

        let name = if name.is_empty() {
            format!("temp_{}", Utc::now().timestamp())
        } else {
            name.to_string()
        };

        let path = self.root.join(&name);
        if path.exists() {
            return Err(WorkspaceError::AlreadyExists(name));
        }

        self.scaffolder
            .create_project(template, &path, &name, sink)
            .await?;

        let meta = TempProjectMeta {
            name: name.clone(),
            created_at: Utc::now(),
            template: template.name().to_string(),
            path: path.clone(),
        };
        if let Err(e) = write_meta(&path, &meta).await {
            tracing::warn!(project = %name, error = %e, "failed to save temp project metadata");
        }

        Ok(path)
    }

    /// Enumerate all instances. A missing or malformed sidecar degrades to
    /// synthesized metadata (directory name, directory mtime, template
    /// "unknown"); only an unreadable root fails.
    pub async fn list(&self) -> Result<Vec<TempProjectMeta>, WorkspaceError> {
        self.ensure_root().await?;

        let mut entries = read_root(&self.root).await?;
        let mut projects = Vec::new();

        while let Some(entry) = next_dir_entry(&mut entries, &self.root).await? {
            let path = entry.path();
            let meta = match read_meta(&path).await {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "no usable sidecar, synthesizing metadata");
                    let created_at = entry
                        .metadata()
                        .await
                        .ok()
                        .and_then(|md| md.modified().ok())
                        .map(DateTime::<Utc>::from)
                        .unwrap_or_else(Utc::now);
                    TempProjectMeta {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        created_at,
                        template: "unknown".to_string(),
                        path,
                    }
                }
            };
            projects.push(meta);
        }

        Ok(projects)
    }

    /// Remove one instance, sidecar included.
    pub async fn delete(&self, name: &str) -> Result<(), WorkspaceError> {
        self.ensure_root().await?;

        let path = self.root.join(name);
        if !path.exists() {
            return Err(WorkspaceError::NotFound(name.to_string()));
        }

        fs::remove_dir_all(&path)
            .await
            .map_err(|source| WorkspaceError::Io {
                action: "remove",
                path,
                source,
            })
    }

    /// Remove every instance. The sweep stops at the first removal failure
    /// and returns it; remaining entries are not guaranteed attempted.
    pub async fn clean_all(&self) -> Result<(), WorkspaceError> {
        self.ensure_root().await?;

        let mut entries = read_root(&self.root).await?;
        while let Some(entry) = next_dir_entry(&mut entries, &self.root).await? {
            let path = entry.path();
            fs::remove_dir_all(&path)
                .await
                .map_err(|source| WorkspaceError::Io {
                    action: "remove",
                    path,
                    source,
                })?;
        }

        Ok(())
    }

    /// Move an instance to a permanent location with a single rename, then
    /// strip the sidecar from the promoted project (its absence is
    /// harmless, so removal errors are ignored).
    ///
    /// A rename across filesystems cannot be atomic; that surfaces as
    /// [`WorkspaceError::CrossDevice`] instead of silently copying.
    pub async fn promote(&self, name: &str, target: &Path) -> Result<(), WorkspaceError> {
        self.ensure_root().await?;

        let source = self.root.join(name);
        if !source.exists() {
            return Err(WorkspaceError::NotFound(name.to_string()));
        }
        if target.exists() {
            return Err(WorkspaceError::AlreadyExists(
                target.display().to_string(),
            ));
        }

        fs::rename(&source, target).await.map_err(|e| {
            if e.kind() == io::ErrorKind::CrossesDevices {
                WorkspaceError::CrossDevice {
                    name: name.to_string(),
                    source: e,
                }
            } else {
                WorkspaceError::Io {
                    action: "move",
                    path: source.clone(),
                    source: e,
                }
            }
        })?;

        let _ = fs::remove_file(target.join(META_FILE)).await;

        Ok(())
    }
}

async fn read_root(root: &Path) -> Result<fs::ReadDir, WorkspaceError> {
    fs::read_dir(root).await.map_err(|source| WorkspaceError::Io {
        action: "read",
        path: root.to_path_buf(),
        source,
    })
}

async fn next_dir_entry(
    entries: &mut fs::ReadDir,
    root: &Path,
) -> Result<Option<fs::DirEntry>, WorkspaceError> {
    loop {
        let entry = entries
            .next_entry()
            .await
            .map_err(|source| WorkspaceError::Io {
                action: "read",
                path: root.to_path_buf(),
                source,
            })?;
        match entry {
            None => return Ok(None),
            Some(entry) => {
                let is_dir = entry
                    .file_type()
                    .await
                    .map(|ft| ft.is_dir())
                    .unwrap_or(false);
                if is_dir {
                    return Ok(Some(entry));
                }
            }
        }
    }
}

async fn write_meta(dir: &Path, meta: &TempProjectMeta) -> io::Result<()> {
    let data = serde_json::to_vec_pretty(meta)?;
    fs::write(dir.join(META_FILE), data).await
}

async fn read_meta(dir: &Path) -> io::Result<TempProjectMeta> {
    let data = fs::read(dir.join(META_FILE)).await?;
    Ok(serde_json::from_slice(&data)?)
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::templates::{builtin_templates, find_template};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn workspace(root: impl Into<PathBuf>) -> TempWorkspace {
        // `true` stands in for `go`, so only the filesystem side runs.
        TempWorkspace::with_scaffolder(root, Scaffolder::with_go_bin("true"))
    }

    fn blank() -> Arc<dyn Template> {
        find_template(&builtin_templates(), "blank").unwrap()
    }

    #[tokio::test]
    async fn create_then_list_shows_the_instance() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        let path = ws.create(blank().as_ref(), "foo", None).await.unwrap();
        assert!(path.join(META_FILE).exists());

        let projects = ws.list().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "foo");
        assert_eq!(projects[0].template, "blank");
        assert_eq!(projects[0].path, path);
    }

    #[tokio::test]
    async fn create_twice_fails_with_already_exists() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        ws.create(blank().as_ref(), "dup", None).await.unwrap();
        let err = ws.create(blank().as_ref(), "dup", None).await.unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(name) if name == "dup"));
    }

    #[tokio::test]
    async fn empty_name_is_synthesized() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        let path = ws.create(blank().as_ref(), "", None).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("temp_"), "unexpected name: {name}");
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        ws.create(blank().as_ref(), "gone", None).await.unwrap();
        ws.delete("gone").await.unwrap();
        assert!(ws.list().await.unwrap().is_empty());

        let err = ws.delete("gone").await.unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_sidecar_falls_back_to_synthesized_metadata() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        let dir = tmp.path().join("stray");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join(META_FILE), "not json").unwrap();

        let projects = ws.list().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "stray");
        assert_eq!(projects[0].template, "unknown");
    }

    #[tokio::test]
    async fn list_ignores_plain_files_in_the_root() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());
        std::fs::write(tmp.path().join("note.txt"), "x").unwrap();

        assert!(ws.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn promote_moves_and_strips_the_sidecar() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path().join("root"));
        let target = tmp.path().join("promoted");

        ws.create(blank().as_ref(), "keeper", None).await.unwrap();
        ws.promote("keeper", &target).await.unwrap();

        assert!(target.join("main.go").exists());
        assert!(!target.join(META_FILE).exists());
        assert!(ws.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn promote_preconditions() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path().join("root"));

        let err = ws
            .promote("missing", &tmp.path().join("anywhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound(_)));

        ws.create(blank().as_ref(), "src", None).await.unwrap();
        let occupied = tmp.path().join("occupied");
        std::fs::create_dir(&occupied).unwrap();
        let err = ws.promote("src", &occupied).await.unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn clean_all_removes_every_instance() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        for name in ["a", "b", "c"] {
            ws.create(blank().as_ref(), name, None).await.unwrap();
        }
        ws.clean_all().await.unwrap();
        assert!(ws.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clean_all_reports_the_failing_entry() {
        use std::os::unix::fs::PermissionsExt;

        // Permission bits don't stop root, so the simulation only works
        // for ordinary users.
        let euid_is_root = std::process::Command::new("id")
            .arg("-u")
            .output()
            .map(|o| String::from_utf8_lossy(&o.stdout).trim() == "0")
            .unwrap_or(false);
        if euid_is_root {
            return;
        }

        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path());

        for name in ["a", "b", "c"] {
            ws.create(blank().as_ref(), name, None).await.unwrap();
        }

        // Make `b` undeletable: its children cannot be unlinked from a
        // read-only directory.
        let b = tmp.path().join("b");
        let mut perms = std::fs::metadata(&b).unwrap().permissions();
        perms.set_mode(0o555);
        std::fs::set_permissions(&b, perms.clone()).unwrap();

        let err = ws.clean_all().await.unwrap_err();
        assert!(err.to_string().contains("/b"), "error was: {err}");

        perms.set_mode(0o755);
        std::fs::set_permissions(&b, perms).unwrap();
    }
}
