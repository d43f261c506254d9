//! Built-in Go project templates.
//!
//! A template is a plain data producer behind the narrow [`Template`]
//! capability set. The catalog is an explicit constructed list; add new
//! templates by implementing the trait in a sibling module and appending to
//! [`builtin_templates`].

mod blank;
mod ebiten;
mod fiber;
mod gin;
mod nethttp;

use std::sync::Arc;

/// A named generator of a Go file tree plus a dependency list,
/// parameterized by project name.
pub trait Template: Send + Sync {
    /// Selector key shown to the user.
    fn name(&self) -> &str;

    /// Human-friendly summary.
    fn description(&self) -> &str;

    /// Relative directory under the project root where generated files are
    /// placed. Empty means the project root itself.
    fn root_dir(&self) -> &str {
        ""
    }

    /// Relative path → file content pairs to write for the project.
    fn files(&self, project_name: &str) -> Vec<(String, String)>;

    /// Go modules installed with `go get`, in installation order.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }
}

/// The default catalog, in menu order.
pub fn builtin_templates() -> Vec<Arc<dyn Template>> {
    vec![
        Arc::new(blank::Blank),
        Arc::new(gin::Gin),
        Arc::new(fiber::Fiber),
        Arc::new(nethttp::NetHttp),
        Arc::new(ebiten::Ebiten),
    ]
}

/// First-match lookup by name. Duplicate names resolve to the first entry.
pub fn find_template(
    templates: &[Arc<dyn Template>],
    name: &str,
) -> Option<Arc<dyn Template>> {
    templates.iter().find(|t| t.name() == name).cloned()
}
