//! Error taxonomy for the automation agent
//!
//! Every task handler fails with exactly one of these kinds; the request
//! handler maps them uniformly to an HTTP status plus a descriptive string,
//! never leaking internal detail beyond that string.

use thiserror::Error;
use warp::http::StatusCode;

/// Main error type for agent operations
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Missing input: {path} not found")]
    MissingInput { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("External tool failed: {message}")]
    ExternalToolFailure { message: String },

    #[error("Dependency failure: {message}")]
    DependencyFailure { message: String },

    #[error("Unsupported task: {task}")]
    Unsupported { task: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AgentError {
    /// HTTP status for a user-visible failure response
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgentError::MissingInput { .. } => StatusCode::NOT_FOUND,
            AgentError::Unsupported { .. } => StatusCode::BAD_REQUEST,
            AgentError::InvalidFormat { .. }
            | AgentError::ExternalToolFailure { .. }
            | AgentError::DependencyFailure { .. }
            | AgentError::Config(_)
            | AgentError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Sanitized message suitable for the HTTP response body
    pub fn user_message(&self) -> String {
        sanitize_error_message(&self.to_string())
    }

    /// Create missing input error
    pub fn missing_input(path: impl std::fmt::Display) -> Self {
        Self::MissingInput {
            path: path.to_string(),
        }
    }

    /// Create invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create external tool failure
    pub fn external_tool<S: Into<String>>(message: S) -> Self {
        Self::ExternalToolFailure {
            message: message.into(),
        }
    }

    /// Create dependency failure
    pub fn dependency<S: Into<String>>(message: S) -> Self {
        Self::DependencyFailure {
            message: message.into(),
        }
    }

    /// Create unsupported task error
    pub fn unsupported<S: Into<String>>(task: S) -> Self {
        Self::Unsupported { task: task.into() }
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Sanitize error messages before they leave the process
fn sanitize_error_message(message: &str) -> String {
    // Redact common secret patterns
    let mut sanitized = regex::Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+")
        .unwrap()
        .replace_all(message, "${1}=***")
        .to_string();

    // Truncate very long messages - ensure total length is <= 500
    if sanitized.len() > 500 {
        let truncate_suffix = "...[truncated]";
        // Back off to a char boundary so multibyte content cannot split
        let mut cut = 500 - truncate_suffix.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str(truncate_suffix);
    }

    sanitized
}

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AgentError::missing_input("data/dates.txt").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AgentError::unsupported("fold laundry").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AgentError::invalid_format("bad json").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AgentError::external_tool("prettier exited 2").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AgentError::dependency("embedding service down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_display() {
        let error = AgentError::missing_input("data/contacts.json");
        assert_eq!(
            error.to_string(),
            "Missing input: data/contacts.json not found"
        );

        let error = AgentError::invalid_format("no sender address in email content");
        assert!(error.to_string().starts_with("Invalid format:"));
    }

    #[test]
    fn test_user_message_redacts_secrets() {
        let error = AgentError::external_tool("generator failed: token=abc456 password=hunter2");
        let message = error.user_message();

        assert!(!message.contains("abc456"));
        assert!(!message.contains("hunter2"));
        assert!(message.contains("token=***"));
        assert!(message.contains("password=***"));
    }

    #[test]
    fn test_user_message_truncation() {
        let error = AgentError::internal("x".repeat(600));
        let message = error.user_message();

        assert!(message.len() <= 500);
        assert!(message.ends_with("...[truncated]"));
    }

    #[test]
    fn test_user_message_truncation_respects_char_boundaries() {
        // The accent lands exactly across the truncation offset once the
        // "Internal error: " prefix is counted
        let error = AgentError::internal(format!("{}é{}", "x".repeat(469), "y".repeat(100)));
        let message = error.user_message();

        assert!(message.len() <= 500);
        assert!(message.ends_with("...[truncated]"));
    }

    #[test]
    fn test_sanitize_short_message_untouched() {
        let message = "Counted 2 Wednesdays in dates.txt";
        assert_eq!(sanitize_error_message(message), message);
    }
}
