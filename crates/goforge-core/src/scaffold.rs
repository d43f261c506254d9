//! Project scaffolding pipeline.

use std::path::Path;

use tokio::fs;

use crate::error::ScaffoldError;
use crate::runner::{run_tool, LineSink};
use crate::templates::Template;

/// Runs the scaffolding pipeline for one project.
///
/// The Go binary is configurable so tests can substitute a stub; everything
/// else about the step sequence is fixed.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    go_bin: String,
}

impl Default for Scaffolder {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaffolder {
    pub fn new() -> Self {
        Self {
            go_bin: "go".to_string(),
        }
    }

    pub fn with_go_bin(go_bin: impl Into<String>) -> Self {
        Self {
            go_bin: go_bin.into(),
        }
    }

    /// Scaffold a project from `template` at `target`, in fixed order:
    /// target dir, template root dir, `go mod init`, template files,
    /// `go get` once per dependency (sequential — Go serializes on
    /// go.mod/go.sum), `go mod tidy`.
    ///
    /// The first failing step aborts; already-created directories and files
    /// are left in place for inspection. Callers wanting atomicity should
    /// scaffold into a staging path and rename on success.
    pub async fn create_project(
        &self,
        template: &dyn Template,
        target: &Path,
        project_name: &str,
        sink: Option<LineSink>,
    ) -> Result<(), ScaffoldError> {
        tracing::debug!(
            template = template.name(),
            project = project_name,
            target = %target.display(),
            "scaffolding project"
        );

        create_dir(target).await?;

        let base_dir = target.join(template.root_dir());
        create_dir(&base_dir).await?;

        run_tool(
            &self.go_bin,
            target,
            &["mod", "init", project_name],
            sink.clone(),
        )
        .await?;

        for (rel, content) in template.files(project_name) {
            let full = base_dir.join(&rel);
            if let Some(parent) = full.parent() {
                create_dir(parent).await?;
            }
            fs::write(&full, content)
                .await
                .map_err(|source| ScaffoldError::WriteFile { path: full, source })?;
        }

        for dep in template.dependencies() {
            run_tool(&self.go_bin, target, &["get", &dep], sink.clone()).await?;
        }

        run_tool(&self.go_bin, target, &["mod", "tidy"], sink).await?;

        Ok(())
    }
}

async fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path)
        .await
        .map_err(|source| ScaffoldError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::templates::builtin_templates;
    use tempfile::TempDir;

    fn template(name: &str) -> std::sync::Arc<dyn Template> {
        crate::templates::find_template(&builtin_templates(), name)
            .expect("builtin template")
    }

    // `true` accepts any arguments and exits 0, standing in for `go`.
    fn scaffolder() -> Scaffolder {
        Scaffolder::with_go_bin("true")
    }

    #[tokio::test]
    async fn materializes_template_files_with_name_substituted() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("demo");
        let tpl = template("blank");

        scaffolder()
            .create_project(tpl.as_ref(), &target, "demo", None)
            .await
            .unwrap();

        let main_go = std::fs::read_to_string(target.join("main.go")).unwrap();
        assert!(main_go.contains("Hello from demo!"));
    }

    #[tokio::test]
    async fn creates_nested_file_parents() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("web");
        let tpl = template("fiber");

        scaffolder()
            .create_project(tpl.as_ref(), &target, "web", None)
            .await
            .unwrap();

        assert!(target.join("views/index.html").exists());
    }

    #[tokio::test]
    async fn second_run_overwrites_without_failing() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("twice");
        let tpl = template("blank");
        let s = scaffolder();

        s.create_project(tpl.as_ref(), &target, "twice", None)
            .await
            .unwrap();
        s.create_project(tpl.as_ref(), &target, "twice", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failing_tool_aborts_the_pipeline() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("broken");
        let tpl = template("blank");

        let err = Scaffolder::with_go_bin("false")
            .create_project(tpl.as_ref(), &target, "broken", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Exec(_)));
        // mod init fails first, so no template file was written
        assert!(!target.join("main.go").exists());
    }
}
