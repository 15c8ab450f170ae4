//! Mock implementations for testing
//!
//! Provides a mock embedding provider so catalog and similarity tests run
//! without an inference service.

use crate::embeddings::{EmbeddingError, EmbeddingProvider};
use async_trait::async_trait;
use std::collections::HashMap;

/// Mock embedding provider with canned vectors keyed by input text
///
/// Inputs without a canned vector get a deterministic fallback derived from
/// the text, so batches never fail on coverage gaps.
#[derive(Debug, Default)]
pub struct MockEmbeddingProvider {
    vectors: HashMap<String, Vec<f32>>,
    should_fail: bool,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vectors<I, S>(vectors: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        Self {
            vectors: vectors
                .into_iter()
                .map(|(text, vector)| (text.into(), vector))
                .collect(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Deterministic fallback vector for texts without a canned entry
    fn fallback_vector(text: &str) -> Vec<f32> {
        let mut hash: u32 = 2166136261;
        for byte in text.bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(16777619);
        }
        vec![
            (hash & 0xff) as f32 / 255.0,
            ((hash >> 8) & 0xff) as f32 / 255.0,
            ((hash >> 16) & 0xff) as f32 / 255.0,
        ]
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.should_fail {
            return Err(EmbeddingError::Unreachable(
                "mock embedding failure".to_string(),
            ));
        }

        Ok(inputs
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| Self::fallback_vector(text))
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        3
    }
}
