//! Sender address extraction

use crate::error::{AgentError, AgentResult};
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use regex::Regex;

const INPUT: &str = "email.txt";
const OUTPUT: &str = "email-sender.txt";

/// Extract the bracketed sender address from a `From:` header line
pub struct SenderEmailTask {
    pattern: Regex,
}

impl SenderEmailTask {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"From:.*<(.+?)>").expect("sender pattern is valid"),
        }
    }

    /// Bracketed address from the first matching `From:` line, if any
    fn extract_sender(&self, content: &str) -> Option<String> {
        self.pattern
            .captures(content)
            .map(|captures| captures[1].to_string())
    }
}

impl Default for SenderEmailTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskHandler for SenderEmailTask {
    fn name(&self) -> &str {
        "extract_sender_email"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let content = ctx.workspace.read_to_string(INPUT)?;

        let sender = self.extract_sender(&content).ok_or_else(|| {
            AgentError::invalid_format(format!("no sender address found in {INPUT}"))
        })?;

        ctx.workspace.write_atomic(OUTPUT, &sender)?;

        Ok(format!("Sender address {sender} extracted to {OUTPUT}."))
    }
}
