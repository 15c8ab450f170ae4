//! Task classification
//!
//! Maps a free-text task description to an operation identifier using an
//! ordered list of keyword predicates. The ordering is part of the public
//! contract: first match wins, later rules are never reached.

mod matcher;

pub use matcher::{OperationId, TaskMatcher, TaskRoute};
