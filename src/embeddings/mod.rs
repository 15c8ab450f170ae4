//! Embedding capability
//!
//! Text fragments go in, fixed-length vectors come out. The provider is a
//! trait seam so the similarity engine can be tested against canned vectors
//! while production talks to a TEI-style HTTP service.

pub mod http;
pub mod similarity;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpEmbeddingProvider;

/// External embedding capability: one vector per input string, batched
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Compute one embedding per input, in input order
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Dimension of the vectors this provider produces
    fn dimension(&self) -> usize;
}

/// Embedding capability failures
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding service unreachable: {0}")]
    Unreachable(String),
    #[error("Embedding service error: {0}")]
    ServiceError(String),
    #[error("Malformed embedding response: {0}")]
    MalformedResponse(String),
}
