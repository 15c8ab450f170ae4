//! Card number extraction via OCR

use crate::error::{AgentError, AgentResult};
use crate::tasks::process::run_tool;
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

const INPUT: &str = "credit_card.png";
const OUTPUT: &str = "credit-card.txt";

/// OCR the card image and extract the 16-digit number, spaces removed
pub struct CreditCardTask {
    ocr: PathBuf,
    timeout: Duration,
    pattern: Regex,
}

impl CreditCardTask {
    pub fn new(ocr: PathBuf, timeout_secs: u64) -> Self {
        Self {
            ocr,
            timeout: Duration::from_secs(timeout_secs),
            pattern: Regex::new(r"\b\d{4}\s?\d{4}\s?\d{4}\s?\d{4}\b")
                .expect("card pattern is valid"),
        }
    }

    /// 16 digits in 4 groups with optional spaces, concatenated
    fn extract_card_number(&self, text: &str) -> Option<String> {
        self.pattern
            .find(text)
            .map(|m| m.as_str().replace(' ', ""))
    }
}

#[async_trait]
impl TaskHandler for CreditCardTask {
    fn name(&self) -> &str {
        "extract_credit_card"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let image = ctx.workspace.path(INPUT);
        if !image.exists() {
            return Err(AgentError::missing_input(image.display()));
        }

        // tesseract-style invocation: <binary> <image> stdout
        let output = run_tool(
            &self.ocr,
            [image.as_os_str(), "stdout".as_ref()],
            self.timeout,
        )
        .await?;

        let number = self.extract_card_number(&output.stdout).ok_or_else(|| {
            AgentError::invalid_format("no valid card number found in the image")
        })?;

        ctx.workspace.write_atomic(OUTPUT, &number)?;

        Ok(format!("Card number extracted to {OUTPUT}."))
    }
}
