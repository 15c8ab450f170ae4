//! Ordered keyword matcher for task descriptions
//!
//! Classification is deliberately simple: lower-case the task string and
//! test a fixed sequence of substring predicates, first match wins. This is
//! acceptable only because the catalog is small and the rules are
//! non-overlapping by construction; the rule order below is a documented,
//! testable contract, not incidental code order.

use serde::Serialize;

/// Identifier of a supported catalog operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationId {
    Datagen,
    FormatMarkdown,
    CountWednesdays,
    SortContacts,
    ExtractRecentLogs,
    MarkdownIndex,
    ExtractSenderEmail,
    ExtractCreditCard,
    SimilarComments,
}

/// Classification result: the operation plus any argument extracted from
/// the task text itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRoute {
    pub operation: OperationId,
    /// Inline argument (currently only the datagen address), taken from the
    /// task string rather than from a file
    pub argument: Option<String>,
}

impl TaskRoute {
    fn new(operation: OperationId) -> Self {
        Self {
            operation,
            argument: None,
        }
    }

    fn with_argument(operation: OperationId, argument: String) -> Self {
        Self {
            operation,
            argument: Some(argument),
        }
    }
}

/// Predicate over the lower-cased task string
enum Predicate {
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
}

impl Predicate {
    fn matches(&self, task: &str) -> bool {
        match self {
            Predicate::Contains(needle) => task.contains(needle),
            Predicate::ContainsAll(needles) => needles.iter().all(|n| task.contains(n)),
        }
    }
}

/// First-match-wins task classifier
pub struct TaskMatcher {
    rules: Vec<(Predicate, OperationId)>,
}

impl TaskMatcher {
    pub fn new() -> Self {
        // Rule order is load-bearing and mirrors the documented catalog
        // order. Anything containing both "extract" and "log" routes to
        // recent-logs even if a later rule would also match.
        let rules = vec![
            (Predicate::Contains("datagen"), OperationId::Datagen),
            (
                Predicate::ContainsAll(&["format", "markdown"]),
                OperationId::FormatMarkdown,
            ),
            (
                Predicate::Contains("count wednesdays"),
                OperationId::CountWednesdays,
            ),
            (
                Predicate::Contains("sort contacts"),
                OperationId::SortContacts,
            ),
            (
                Predicate::ContainsAll(&["extract", "log"]),
                OperationId::ExtractRecentLogs,
            ),
            (
                Predicate::Contains("create markdown index"),
                OperationId::MarkdownIndex,
            ),
            (
                Predicate::Contains("extract sender email"),
                OperationId::ExtractSenderEmail,
            ),
            (
                Predicate::Contains("extract credit card"),
                OperationId::ExtractCreditCard,
            ),
            (
                Predicate::Contains("find similar comments"),
                OperationId::SimilarComments,
            ),
        ];
        Self { rules }
    }

    /// Classify a task description, or `None` when no rule matches
    pub fn classify(&self, task: &str) -> Option<TaskRoute> {
        let lowered = task.to_lowercase();

        for (predicate, operation) in &self.rules {
            if predicate.matches(&lowered) {
                return Some(match operation {
                    OperationId::Datagen => {
                        TaskRoute::with_argument(*operation, extract_datagen_address(task))
                    }
                    _ => TaskRoute::new(*operation),
                });
            }
        }

        None
    }

    /// The documented rule order, for contract tests
    pub fn rule_order(&self) -> Vec<OperationId> {
        self.rules.iter().map(|(_, op)| *op).collect()
    }
}

impl Default for TaskMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the generator address out of the task text
///
/// Splits on the literal `email=` marker and takes the trailing segment,
/// trimmed. An absent marker leaves the whole trimmed task string as the
/// argument; the generator is expected to reject a non-address.
fn extract_datagen_address(task: &str) -> String {
    task.rsplit("email=").next().unwrap_or("").trim().to_string()
}
