//! Recent log head extraction

use crate::error::{AgentError, AgentResult};
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::SystemTime;

const LOGS_DIR: &str = "logs";
const OUTPUT: &str = "logs-recent.txt";
const MAX_FILES: usize = 10;

/// First line of each of the 10 most recently modified `.log` files,
/// most recent first
///
/// Files with an empty first line are omitted; fewer than 10 files means
/// all available files are used.
pub struct RecentLogsTask;

impl RecentLogsTask {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecentLogsTask {
    fn default() -> Self {
        Self::new()
    }
}

/// First line of the content, trimmed; `None` when empty
fn first_line(content: &str) -> Option<String> {
    let line = content.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[async_trait]
impl TaskHandler for RecentLogsTask {
    fn name(&self) -> &str {
        "extract_recent_logs"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let logs_dir = ctx.workspace.require_dir(LOGS_DIR)?;

        let mut log_files: Vec<(SystemTime, PathBuf)> = Vec::new();
        let entries = std::fs::read_dir(&logs_dir).map_err(|e| {
            AgentError::internal(format!("failed to list {}: {e}", logs_dir.display()))
        })?;
        for entry in entries {
            let entry = entry
                .map_err(|e| AgentError::internal(format!("failed to read directory entry: {e}")))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("log") {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            log_files.push((modified, path));
        }

        // Most recent first
        log_files.sort_by(|a, b| b.0.cmp(&a.0));

        let mut extracted = Vec::new();
        for (_, path) in log_files.iter().take(MAX_FILES) {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AgentError::internal(format!("failed to read {}: {e}", path.display()))
            })?;
            if let Some(line) = first_line(&content) {
                extracted.push(line);
            }
        }

        ctx.workspace.write_atomic(OUTPUT, &extracted.join("\n"))?;

        Ok(format!(
            "Extracted {} lines from the {} most recent log files in {LOGS_DIR}/.",
            extracted.len(),
            log_files.len().min(MAX_FILES)
        ))
    }
}
