//! fileagent - single-endpoint automation agent
//!
//! Receives a free-text task description over HTTP, classifies it into one
//! of a fixed catalog of file-processing operations, executes that operation
//! against a working data directory, and reports success or failure.
//!
//! # Overview
//!
//! - Ordered keyword routing from task text to an operation identifier
//! - A closed catalog of nine deterministic file operations
//! - Embedding-backed similarity search for the closest comment pair
//! - Bounded-timeout wrappers around external formatter/generator/OCR tools
//!
//! # Quick Start
//!
//! ```rust
//! use fileagent::routing::{OperationId, TaskMatcher};
//!
//! let matcher = TaskMatcher::new();
//! let route = matcher.classify("please count wednesdays in dates.txt").unwrap();
//! assert_eq!(route.operation, OperationId::CountWednesdays);
//! ```

pub mod config;
pub mod embeddings;
pub mod error;
pub mod observability;
pub mod routing;
pub mod server;
pub mod tasks;
pub mod testing;
pub mod workspace;

pub use config::AgentConfig;
pub use error::{AgentError, AgentResult};
pub use routing::{OperationId, TaskMatcher, TaskRoute};
pub use server::AgentServer;
pub use tasks::{TaskCatalog, TaskContext, TaskHandler};
pub use workspace::Workspace;
