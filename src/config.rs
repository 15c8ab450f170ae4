//! Configuration system for the automation agent
//!
//! All runtime options live in one TOML file loaded at startup and passed
//! down explicitly. There are no process-wide mutable globals: the data root
//! and external tool paths travel inside `AgentConfig`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main agent configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub agent: AgentSection,
    #[serde(default)]
    pub server: ServerSection,
    pub data: DataSection,
    pub tools: ToolsSection,
    pub embeddings: EmbeddingsSection,
}

/// Agent identity section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSection {
    /// Agent identifier (must match [a-zA-Z0-9._-]+)
    pub id: String,
    /// Description of what this agent does
    pub description: String,
}

/// HTTP server section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Data directory section
///
/// Every operation reads and writes relative to `root`; nothing escapes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSection {
    pub root: PathBuf,
}

/// External tool binaries invoked by task handlers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsSection {
    /// Markdown formatter binary (invoked with --write <file>)
    pub formatter: PathBuf,
    /// Data generator binary (invoked with <address> --root <data root>)
    pub generator: PathBuf,
    /// OCR binary (invoked with <image> stdout)
    pub ocr: PathBuf,
    /// Bound on every external tool invocation, in seconds
    #[serde(default = "default_tool_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tool_timeout_secs() -> u64 {
    30
}

/// Embedding service section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingsSection {
    /// Base URL of a TEI-style embedding HTTP service
    pub base_url: String,
    /// Expected embedding dimension
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
    /// Request timeout, in seconds
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_embedding_dimension() -> usize {
    384
}

fn default_embedding_timeout_secs() -> u64 {
    30
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid agent ID format: {0}")]
    InvalidAgentId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AgentConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AgentConfig = toml::from_str(&content)?;

        validate_agent_id(&config.agent.id)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate cross-field consistency
    fn validate(&self) -> Result<(), ConfigError> {
        if self.data.root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "data.root must not be empty".to_string(),
            ));
        }
        if self.tools.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "tools.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.embeddings.dimension == 0 {
            return Err(ConfigError::InvalidConfig(
                "embeddings.dimension must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[agent]
id = "test-agent"
description = "A test automation agent"

[data]
root = "./data"

[tools]
formatter = "prettier"
generator = "datagen"
ocr = "tesseract"

[embeddings]
base_url = "http://127.0.0.1:8081"
dimension = 384
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}

/// Validate agent ID format
fn validate_agent_id(agent_id: &str) -> Result<(), ConfigError> {
    let valid_chars = agent_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

    if agent_id.is_empty() || !valid_chars {
        return Err(ConfigError::InvalidAgentId(format!(
            "Agent ID '{agent_id}' must match pattern [a-zA-Z0-9._-]+"
        )));
    }

    Ok(())
}
