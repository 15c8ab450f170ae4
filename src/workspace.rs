//! Data directory access for task handlers
//!
//! Every operation reads and writes through a [`Workspace`] rooted at the
//! configured data directory. Caller-supplied paths are containment-checked
//! so nothing escapes the root, and outputs are written atomically (temp
//! file plus rename) so a failed operation leaves no partial file behind.

use crate::error::{AgentError, AgentResult};
use std::path::{Component, Path, PathBuf};

/// Filesystem root shared by all task handlers
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a fixed relative name onto the root
    ///
    /// For the well-known file names baked into the catalog (dates.txt,
    /// contacts.json, ...). Caller-supplied paths go through [`resolve`]
    /// instead.
    ///
    /// [`resolve`]: Workspace::resolve
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Containment-checked join for caller-supplied relative paths
    ///
    /// Rejects absolute paths and any `..` component, so a request can never
    /// read or write outside the data directory.
    pub fn resolve(&self, relative: &str) -> AgentResult<PathBuf> {
        let candidate = Path::new(relative);

        if candidate.is_absolute() {
            return Err(AgentError::invalid_format(format!(
                "path must be relative to the data directory: {relative}"
            )));
        }

        for component in candidate.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(AgentError::invalid_format(format!(
                        "path escapes the data directory: {relative}"
                    )));
                }
            }
        }

        Ok(self.root.join(candidate))
    }

    /// Read a required input file, mapping absence to `MissingInput`
    pub fn read_to_string(&self, name: &str) -> AgentResult<String> {
        let path = self.path(name);
        if !path.exists() {
            return Err(AgentError::missing_input(path.display()));
        }
        std::fs::read_to_string(&path)
            .map_err(|e| AgentError::internal(format!("failed to read {}: {e}", path.display())))
    }

    /// Require that a directory input exists
    pub fn require_dir(&self, name: &str) -> AgentResult<PathBuf> {
        let path = self.path(name);
        if !path.is_dir() {
            return Err(AgentError::missing_input(path.display()));
        }
        Ok(path)
    }

    /// Write an output file atomically relative to success
    ///
    /// The content is staged in a temp file in the same directory and moved
    /// into place with a rename, so readers never observe partial output.
    pub fn write_atomic(&self, name: &str, contents: &str) -> AgentResult<()> {
        let path = self.path(name);
        let parent = path
            .parent()
            .ok_or_else(|| AgentError::internal(format!("no parent for {}", path.display())))?;

        let staging = parent.join(format!(
            ".{}.tmp",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string())
        ));

        std::fs::write(&staging, contents).map_err(|e| {
            AgentError::internal(format!("failed to write {}: {e}", staging.display()))
        })?;
        std::fs::rename(&staging, &path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            AgentError::internal(format!("failed to commit {}: {e}", path.display()))
        })?;

        Ok(())
    }
}
