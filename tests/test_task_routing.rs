//! Task classification contract tests
//!
//! The ordered rule list is part of the public contract: these tests pin
//! both the individual routes and the first-match-wins ordering.

use fileagent::routing::{OperationId, TaskMatcher};

#[test]
fn test_every_catalog_operation_is_reachable() {
    let matcher = TaskMatcher::new();

    let cases = [
        ("run datagen with email=a@b.c", OperationId::Datagen),
        ("format the markdown file in data", OperationId::FormatMarkdown),
        ("count wednesdays in dates.txt", OperationId::CountWednesdays),
        ("sort contacts in contacts.json", OperationId::SortContacts),
        ("extract the recent log heads", OperationId::ExtractRecentLogs),
        ("create markdown index for docs", OperationId::MarkdownIndex),
        ("extract sender email from email.txt", OperationId::ExtractSenderEmail),
        ("extract credit card number", OperationId::ExtractCreditCard),
        ("find similar comments", OperationId::SimilarComments),
    ];

    for (task, expected) in cases {
        let route = matcher.classify(task).expect(task);
        assert_eq!(route.operation, expected, "{task}");
    }
}

#[test]
fn test_count_wednesdays_substring_always_selects_counting() {
    let matcher = TaskMatcher::new();

    // Any task containing the phrase routes to the counting operation,
    // case-insensitively, never to another handler.
    for task in [
        "count wednesdays",
        "COUNT WEDNESDAYS",
        "Please Count Wednesdays for me",
        "in dates.txt count wednesdays and save",
    ] {
        let route = matcher.classify(task).expect(task);
        assert_eq!(route.operation, OperationId::CountWednesdays, "{task}");
    }
}

#[test]
fn test_classification_is_case_insensitive() {
    let matcher = TaskMatcher::new();

    let route = matcher.classify("SORT CONTACTS").unwrap();
    assert_eq!(route.operation, OperationId::SortContacts);

    let route = matcher.classify("Find Similar Comments").unwrap();
    assert_eq!(route.operation, OperationId::SimilarComments);
}

#[test]
fn test_first_match_wins_over_later_rules() {
    let matcher = TaskMatcher::new();

    // Mentions both datagen and sort contacts; datagen is rule one.
    let route = matcher
        .classify("datagen first, then sort contacts")
        .unwrap();
    assert_eq!(route.operation, OperationId::Datagen);

    // "extract" + "log" precedes "extract sender email" in the rule order.
    let route = matcher
        .classify("extract sender email from the mail log")
        .unwrap();
    assert_eq!(route.operation, OperationId::ExtractRecentLogs);
}

#[test]
fn test_datagen_argument_extraction() {
    let matcher = TaskMatcher::new();

    let route = matcher
        .classify("run datagen for email= ops@example.org  ")
        .unwrap();
    assert_eq!(route.argument.as_deref(), Some("ops@example.org"));

    // Last marker wins when repeated
    let route = matcher
        .classify("datagen email=first@x.y email=second@x.y")
        .unwrap();
    assert_eq!(route.argument.as_deref(), Some("second@x.y"));
}

#[test]
fn test_unsupported_tasks_yield_none() {
    let matcher = TaskMatcher::new();

    for task in [
        "",
        "do my taxes",
        "wednesday counting would be nice",
        "similar comments", // missing the "find" keyword
    ] {
        assert!(matcher.classify(task).is_none(), "{task:?}");
    }
}

#[test]
fn test_rule_order_matches_documented_catalog_order() {
    let matcher = TaskMatcher::new();

    assert_eq!(
        matcher.rule_order(),
        vec![
            OperationId::Datagen,
            OperationId::FormatMarkdown,
            OperationId::CountWednesdays,
            OperationId::SortContacts,
            OperationId::ExtractRecentLogs,
            OperationId::MarkdownIndex,
            OperationId::ExtractSenderEmail,
            OperationId::ExtractCreditCard,
            OperationId::SimilarComments,
        ]
    );
}
