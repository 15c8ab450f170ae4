//! Scoped external tool invocation
//!
//! All external binaries (formatter, generator, OCR) run through this one
//! wrapper: bounded timeout, child killed on every exit path, non-zero exit
//! and missing executables surfaced as `ExternalToolFailure` carrying the
//! tool's diagnostic output.

use crate::error::{AgentError, AgentResult};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a completed tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run an external tool to completion under a timeout
pub async fn run_tool<I, S>(program: &Path, args: I, timeout: Duration) -> AgentResult<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);

    debug!(tool = %program.display(), "spawning external tool");

    let run = async {
        let output = command.output().await.map_err(|e| {
            AgentError::external_tool(format!("failed to launch {}: {e}", program.display()))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let diagnostic = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(AgentError::external_tool(format!(
                "{} exited with {}: {diagnostic}",
                program.display(),
                output.status
            )));
        }

        Ok(ToolOutput { stdout, stderr })
    };

    match tokio::time::timeout(timeout, run).await {
        Ok(result) => result,
        // kill_on_drop reaps the child when the future is dropped here
        Err(_) => Err(AgentError::external_tool(format!(
            "{} timed out after {}s",
            program.display(),
            timeout.as_secs()
        ))),
    }
}
