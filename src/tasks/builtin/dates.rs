//! Weekday counting over a dates file

use crate::error::AgentResult;
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

const INPUT: &str = "dates.txt";
const OUTPUT: &str = "dates-wednesdays.txt";

/// Count lines of `dates.txt` that fall on a Wednesday
///
/// Unparsable lines are skipped rather than failing the operation; an empty
/// input file yields a count of zero.
pub struct CountWednesdaysTask;

impl CountWednesdaysTask {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CountWednesdaysTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Count lines parsing as `YYYY-MM-DD` whose weekday matches the target
fn count_weekday(content: &str, target: Weekday) -> usize {
    content
        .lines()
        .filter_map(|line| NaiveDate::parse_from_str(line.trim(), "%Y-%m-%d").ok())
        .filter(|date| date.weekday() == target)
        .count()
}

#[async_trait]
impl TaskHandler for CountWednesdaysTask {
    fn name(&self) -> &str {
        "count_wednesdays"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let content = ctx.workspace.read_to_string(INPUT)?;
        let count = count_weekday(&content, Weekday::Wed);

        ctx.workspace.write_atomic(OUTPUT, &count.to_string())?;

        Ok(format!("Counted {count} Wednesdays in {INPUT}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Workspace;
    use tempfile::TempDir;

    #[test]
    fn test_count_weekday_known_dates() {
        // 2024-01-03 and 2024-01-10 are Wednesdays, 2024-01-11 is a Thursday
        let content = "2024-01-03\n2024-01-10\n2024-01-11\n";
        assert_eq!(count_weekday(content, Weekday::Wed), 2);
    }

    #[test]
    fn test_count_weekday_skips_unparsable_lines() {
        let content = "2024-01-03\nnot a date\n03/01/2024\n\n2024-01-10\n";
        assert_eq!(count_weekday(content, Weekday::Wed), 2);
    }

    #[test]
    fn test_count_weekday_empty_input_is_zero() {
        assert_eq!(count_weekday("", Weekday::Wed), 0);
    }

    #[test]
    fn test_count_weekday_trims_whitespace() {
        assert_eq!(count_weekday("  2024-01-03  \n", Weekday::Wed), 1);
    }

    #[tokio::test]
    async fn test_execute_writes_count_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dates.txt"), "2024-01-03\n2024-01-10\n2024-01-11\n")
            .unwrap();

        let workspace = Workspace::new(dir.path());
        let ctx = TaskContext {
            workspace: &workspace,
            argument: None,
        };

        let message = CountWednesdaysTask::new().execute(&ctx).await.unwrap();
        assert!(message.contains("2"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("dates-wednesdays.txt")).unwrap(),
            "2"
        );
    }

    #[tokio::test]
    async fn test_execute_missing_input() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        let ctx = TaskContext {
            workspace: &workspace,
            argument: None,
        };

        let result = CountWednesdaysTask::new().execute(&ctx).await;
        assert!(matches!(
            result,
            Err(crate::error::AgentError::MissingInput { .. })
        ));
    }
}
