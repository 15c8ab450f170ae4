//! Catalog handler integration tests
//!
//! Drives operations end to end through the TaskCatalog against a temp data
//! directory, with stub shell scripts standing in for the external tools.


use fileagent::error::AgentError;
use fileagent::routing::TaskMatcher;
use fileagent::tasks::TaskCatalog;
use fileagent::testing::mocks::MockEmbeddingProvider;
use fileagent::workspace::Workspace;
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::{stub_tool, test_config};

struct Harness {
    _data: TempDir,
    _tools: TempDir,
    workspace: Workspace,
    catalog: TaskCatalog,
    matcher: TaskMatcher,
}

impl Harness {
    fn new() -> Self {
        Self::with_embeddings(Arc::new(MockEmbeddingProvider::default()))
    }

    fn with_embeddings(embeddings: Arc<dyn fileagent::embeddings::EmbeddingProvider>) -> Self {
        let data = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();

        let mut config = test_config(data.path());
        config.tools.formatter = stub_tool(
            tools.path(),
            "formatter",
            r#"f="$2"; printf '%s\n' "$(cat "$f")" > "$f""#,
        );
        config.tools.generator = stub_tool(
            tools.path(),
            "generator",
            r#"echo "$1" > "$3/generated.txt""#,
        );
        config.tools.ocr = stub_tool(
            tools.path(),
            "ocr",
            "echo 'ACME BANK\n4111 1111 1111 1111\nGOOD THRU'",
        );

        let workspace = Workspace::new(data.path());
        let catalog = TaskCatalog::from_config(&config, embeddings);

        Self {
            _data: data,
            _tools: tools,
            workspace,
            catalog,
            matcher: TaskMatcher::new(),
        }
    }

    async fn run(&self, task: &str) -> Result<String, AgentError> {
        let route = self.matcher.classify(task).expect(task);
        self.catalog.run(&route, &self.workspace).await
    }

    fn write(&self, name: &str, content: &str) {
        let path = self.workspace.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.workspace.root().join(name)).unwrap()
    }
}

#[tokio::test]
async fn test_count_wednesdays_end_to_end() {
    let harness = Harness::new();
    harness.write("dates.txt", "2024-01-03\n2024-01-10\n2024-01-11\n");

    let message = harness.run("count wednesdays").await.unwrap();

    assert!(message.contains("2"));
    assert_eq!(harness.read("dates-wednesdays.txt"), "2");
}

#[tokio::test]
async fn test_count_wednesdays_empty_file_yields_zero() {
    let harness = Harness::new();
    harness.write("dates.txt", "");

    harness.run("count wednesdays").await.unwrap();

    assert_eq!(harness.read("dates-wednesdays.txt"), "0");
}

#[tokio::test]
async fn test_sort_contacts_end_to_end() {
    let harness = Harness::new();
    harness.write(
        "contacts.json",
        r#"[{"first_name":"Bob","last_name":"zeta"},{"first_name":"Amy","last_name":"Alpha"}]"#,
    );

    harness.run("sort contacts").await.unwrap();

    let sorted: serde_json::Value = serde_json::from_str(&harness.read("contacts-sorted.json")).unwrap();
    assert_eq!(sorted[0]["last_name"], "Alpha");
    assert_eq!(sorted[1]["last_name"], "zeta");
}

#[tokio::test]
async fn test_markdown_index_end_to_end() {
    let harness = Harness::new();
    harness.write("docs/a.md", "# Title A\nbody\n");
    harness.write("docs/b.md", "plain text without heading\n");

    harness.run("create markdown index").await.unwrap();

    let index: serde_json::Value = serde_json::from_str(&harness.read("docs/index.json")).unwrap();
    assert_eq!(index["a.md"], "Title A");
    assert_eq!(index["b.md"], "b");
}

#[tokio::test]
async fn test_sender_email_end_to_end() {
    let harness = Harness::new();
    harness.write(
        "email.txt",
        "Date: Mon\nFrom: Jane Doe <jane@example.com>\nSubject: hi\n",
    );

    harness.run("extract sender email").await.unwrap();

    assert_eq!(harness.read("email-sender.txt"), "jane@example.com");
}

#[tokio::test]
async fn test_recent_logs_end_to_end() {
    let harness = Harness::new();
    harness.write("logs/a.log", "line from a\nrest\n");
    harness.write("logs/b.log", "line from b\n");

    let message = harness.run("extract recent logs").await.unwrap();

    assert!(message.contains("Extracted 2 lines"));
    let output = harness.read("logs-recent.txt");
    assert!(output.contains("line from a"));
    assert!(output.contains("line from b"));
}

#[tokio::test]
async fn test_format_markdown_is_idempotent() {
    let harness = Harness::new();
    harness.write("format.md", "# Heading\n\nSome text\n");

    harness.run("format the markdown file").await.unwrap();
    let first = harness.read("format.md");
    harness.run("format the markdown file").await.unwrap();
    let second = harness.read("format.md");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_datagen_invokes_generator_with_root() {
    let harness = Harness::new();

    let message = harness
        .run("run datagen with email=user@example.com")
        .await
        .unwrap();

    assert!(message.contains("user@example.com"));
    assert_eq!(harness.read("generated.txt").trim(), "user@example.com");
}

#[tokio::test]
async fn test_credit_card_extraction_end_to_end() {
    let harness = Harness::new();
    harness.write("credit_card.png", "stub image bytes");

    harness.run("extract credit card number").await.unwrap();

    assert_eq!(harness.read("credit-card.txt"), "4111111111111111");
}

#[tokio::test]
async fn test_similar_comments_end_to_end() {
    let provider = MockEmbeddingProvider::with_vectors([
        ("cats are great", vec![0.9, 0.1, 0.0]),
        ("dogs are great", vec![0.85, 0.15, 0.0]),
        ("the stock market fell", vec![0.0, 0.2, 0.9]),
    ]);
    let harness = Harness::with_embeddings(Arc::new(provider));
    harness.write(
        "comments.txt",
        "cats are great\ndogs are great\nthe stock market fell\n",
    );

    harness.run("find similar comments").await.unwrap();

    assert_eq!(
        harness.read("comments-similar.txt"),
        "cats are great\ndogs are great"
    );
}

#[tokio::test]
async fn test_missing_inputs_map_to_missing_input_errors() {
    let harness = Harness::new();

    for task in [
        "count wednesdays",
        "sort contacts",
        "extract recent logs",
        "create markdown index",
        "extract sender email",
        "extract credit card number",
        "find similar comments",
        "format the markdown file",
    ] {
        let result = harness.run(task).await;
        assert!(
            matches!(result, Err(AgentError::MissingInput { .. })),
            "{task}: {result:?}"
        );
    }
}

#[tokio::test]
async fn test_failed_operation_leaves_no_partial_output() {
    let harness = Harness::new();
    harness.write("email.txt", "no from header here\n");

    let result = harness.run("extract sender email").await;

    assert!(matches!(result, Err(AgentError::InvalidFormat { .. })));
    assert!(!harness.workspace.root().join("email-sender.txt").exists());
}
