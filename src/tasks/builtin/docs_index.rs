//! Markdown document index

use crate::error::{AgentError, AgentResult};
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use std::collections::BTreeMap;
use walkdir::WalkDir;

const DOCS_DIR: &str = "docs";
const OUTPUT: &str = "docs/index.json";

/// Build a JSON index mapping markdown file names to their titles
///
/// The title is the first line beginning with a heading marker, de-marked
/// and trimmed; a file without one falls back to its base name.
pub struct MarkdownIndexTask;

impl MarkdownIndexTask {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownIndexTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Title from the first heading line, if any
fn heading_title(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim().to_string())
}

#[async_trait]
impl TaskHandler for MarkdownIndexTask {
    fn name(&self) -> &str {
        "create_markdown_index"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let docs_dir = ctx.workspace.require_dir(DOCS_DIR)?;

        let mut index = BTreeMap::new();
        for entry in WalkDir::new(&docs_dir) {
            let entry = entry
                .map_err(|e| AgentError::internal(format!("failed to walk {DOCS_DIR}/: {e}")))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("md")
            {
                continue;
            }

            let content = std::fs::read_to_string(path).map_err(|e| {
                AgentError::internal(format!("failed to read {}: {e}", path.display()))
            })?;

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let title = heading_title(&content).unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| name.clone())
            });
            index.insert(name, title);
        }

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| AgentError::internal(format!("failed to serialize index: {e}")))?;
        ctx.workspace.write_atomic(OUTPUT, &json)?;

        Ok(format!(
            "Created markdown index for {} files in {DOCS_DIR}/.",
            index.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Workspace;
    use tempfile::TempDir;

    #[test]
    fn test_heading_title_strips_markers() {
        assert_eq!(heading_title("# Title A\nbody"), Some("Title A".to_string()));
        assert_eq!(heading_title("## Deep Title"), Some("Deep Title".to_string()));
        assert_eq!(heading_title("   #   spaced   "), Some("spaced".to_string()));
    }

    #[test]
    fn test_heading_title_finds_first_heading_line() {
        let content = "intro paragraph\n\n# Real Title\n## Later";
        assert_eq!(heading_title(content), Some("Real Title".to_string()));
    }

    #[test]
    fn test_heading_title_none_without_heading() {
        assert_eq!(heading_title("just text\nno heading"), None);
        assert_eq!(heading_title(""), None);
    }

    #[tokio::test]
    async fn test_execute_indexes_recursively() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        std::fs::create_dir_all(docs.join("nested")).unwrap();

        std::fs::write(docs.join("a.md"), "# Title A\nbody\n").unwrap();
        std::fs::write(docs.join("b.md"), "no heading here\n").unwrap();
        std::fs::write(docs.join("nested/c.md"), "## Nested C\n").unwrap();
        std::fs::write(docs.join("skip.txt"), "# not markdown\n").unwrap();

        let workspace = Workspace::new(dir.path());
        let ctx = TaskContext {
            workspace: &workspace,
            argument: None,
        };

        let message = MarkdownIndexTask::new().execute(&ctx).await.unwrap();
        assert!(message.contains("3 files"));

        let output = std::fs::read_to_string(docs.join("index.json")).unwrap();
        let index: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(index["a.md"], "Title A");
        assert_eq!(index["b.md"], "b");
        assert_eq!(index["c.md"], "Nested C");
        assert!(index.get("skip.txt").is_none());
    }

    #[tokio::test]
    async fn test_execute_missing_docs_dir() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        let ctx = TaskContext {
            workspace: &workspace,
            argument: None,
        };

        let result = MarkdownIndexTask::new().execute(&ctx).await;
        assert!(matches!(result, Err(AgentError::MissingInput { .. })));
    }
}
