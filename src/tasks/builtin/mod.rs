//! Builtin catalog operations
//!
//! Each module keeps its pure transformation helpers separated from the I/O
//! in `execute`, so the interesting logic is unit-testable without a
//! filesystem.

pub mod comments;
pub mod contacts;
pub mod credit_card;
pub mod dates;
pub mod docs_index;
pub mod email;
pub mod external;
pub mod logs;

pub use comments::SimilarCommentsTask;
pub use contacts::SortContactsTask;
pub use credit_card::CreditCardTask;
pub use dates::CountWednesdaysTask;
pub use docs_index::MarkdownIndexTask;
pub use email::SenderEmailTask;
pub use external::{DatagenTask, FormatMarkdownTask};
pub use logs::RecentLogsTask;
