//! Operation catalog
//!
//! One handler per supported operation, behind a uniform [`TaskHandler`]
//! interface so each is independently testable. The [`TaskCatalog`] maps an
//! [`OperationId`] to its handler; handlers are constructed once at startup
//! from configuration and hold their own collaborators (tool paths, the
//! embedding provider).

use crate::config::AgentConfig;
use crate::embeddings::EmbeddingProvider;
use crate::error::{AgentError, AgentResult};
use crate::routing::{OperationId, TaskRoute};
use crate::workspace::Workspace;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub mod builtin;
pub mod process;

/// Per-request execution context handed to a handler
pub struct TaskContext<'a> {
    pub workspace: &'a Workspace,
    /// Inline argument extracted by the matcher, if the rule provides one
    pub argument: Option<&'a str>,
}

/// A single catalog operation: reads declared inputs under the workspace,
/// writes declared outputs, returns a one-line status message
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Stable handler name for logs and diagnostics
    fn name(&self) -> &str;

    /// Execute the operation against the data directory
    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String>;
}

/// Registry of all supported operations
pub struct TaskCatalog {
    handlers: HashMap<OperationId, Box<dyn TaskHandler>>,
}

impl TaskCatalog {
    /// Build the full catalog from configuration
    pub fn from_config(config: &AgentConfig, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        let tools = &config.tools;
        let mut handlers: HashMap<OperationId, Box<dyn TaskHandler>> = HashMap::new();

        handlers.insert(
            OperationId::Datagen,
            Box::new(builtin::DatagenTask::new(
                tools.generator.clone(),
                tools.timeout_secs,
            )),
        );
        handlers.insert(
            OperationId::FormatMarkdown,
            Box::new(builtin::FormatMarkdownTask::new(
                tools.formatter.clone(),
                tools.timeout_secs,
            )),
        );
        handlers.insert(
            OperationId::CountWednesdays,
            Box::new(builtin::CountWednesdaysTask::new()),
        );
        handlers.insert(
            OperationId::SortContacts,
            Box::new(builtin::SortContactsTask::new()),
        );
        handlers.insert(
            OperationId::ExtractRecentLogs,
            Box::new(builtin::RecentLogsTask::new()),
        );
        handlers.insert(
            OperationId::MarkdownIndex,
            Box::new(builtin::MarkdownIndexTask::new()),
        );
        handlers.insert(
            OperationId::ExtractSenderEmail,
            Box::new(builtin::SenderEmailTask::new()),
        );
        handlers.insert(
            OperationId::ExtractCreditCard,
            Box::new(builtin::CreditCardTask::new(
                tools.ocr.clone(),
                tools.timeout_secs,
            )),
        );
        handlers.insert(
            OperationId::SimilarComments,
            Box::new(builtin::SimilarCommentsTask::new(embeddings)),
        );

        Self { handlers }
    }

    /// Execute the routed operation against the workspace
    pub async fn run(&self, route: &TaskRoute, workspace: &Workspace) -> AgentResult<String> {
        let handler = self.handlers.get(&route.operation).ok_or_else(|| {
            AgentError::internal(format!("no handler registered for {:?}", route.operation))
        })?;

        let ctx = TaskContext {
            workspace,
            argument: route.argument.as_deref(),
        };

        info!(handler = handler.name(), "executing task handler");
        handler.execute(&ctx).await
    }

    /// Names of all registered handlers
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.values().map(|h| h.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::MockEmbeddingProvider;

    #[test]
    fn test_catalog_covers_every_operation() {
        let config = AgentConfig::test_config();
        let catalog =
            TaskCatalog::from_config(&config, Arc::new(MockEmbeddingProvider::default()));

        assert_eq!(catalog.handlers.len(), 9);
        for operation in [
            OperationId::Datagen,
            OperationId::FormatMarkdown,
            OperationId::CountWednesdays,
            OperationId::SortContacts,
            OperationId::ExtractRecentLogs,
            OperationId::MarkdownIndex,
            OperationId::ExtractSenderEmail,
            OperationId::ExtractCreditCard,
            OperationId::SimilarComments,
        ] {
            assert!(
                catalog.handlers.contains_key(&operation),
                "{operation:?} missing from catalog"
            );
        }
    }

    #[test]
    fn test_handler_names_are_unique() {
        let config = AgentConfig::test_config();
        let catalog =
            TaskCatalog::from_config(&config, Arc::new(MockEmbeddingProvider::default()));

        let mut names = catalog.handler_names();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
