//! Operations that delegate to external binaries
//!
//! Both handlers treat their tool as a black box: only the success/failure
//! contract and diagnostic output matter here.

use crate::error::{AgentError, AgentResult};
use crate::tasks::process::run_tool;
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Run the data generator with an address argument and the data root
pub struct DatagenTask {
    generator: PathBuf,
    timeout: Duration,
}

impl DatagenTask {
    pub fn new(generator: PathBuf, timeout_secs: u64) -> Self {
        Self {
            generator,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl TaskHandler for DatagenTask {
    fn name(&self) -> &str {
        "datagen"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let address = ctx
            .argument
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AgentError::invalid_format("datagen requires an email= argument"))?;

        let root = ctx.workspace.root().to_path_buf();
        run_tool(
            &self.generator,
            [
                address.as_ref(),
                "--root".as_ref(),
                root.as_os_str(),
            ],
            self.timeout,
        )
        .await?;

        Ok(format!("Data generation completed for {address}."))
    }
}

/// Reformat the markdown file in place with the configured formatter
pub struct FormatMarkdownTask {
    formatter: PathBuf,
    timeout: Duration,
}

impl FormatMarkdownTask {
    pub fn new(formatter: PathBuf, timeout_secs: u64) -> Self {
        Self {
            formatter,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl TaskHandler for FormatMarkdownTask {
    fn name(&self) -> &str {
        "format_markdown"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let target = ctx.workspace.path("format.md");
        if !target.exists() {
            return Err(AgentError::missing_input(target.display()));
        }

        run_tool(
            &self.formatter,
            ["--write".as_ref(), target.as_os_str()],
            self.timeout,
        )
        .await?;

        Ok("Markdown file formatted successfully.".to_string())
    }
}
