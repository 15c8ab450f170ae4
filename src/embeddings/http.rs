//! TEI-style HTTP embedding provider
//!
//! Speaks the Text Embeddings Inference wire shape: `POST {base}/embed`
//! with a batch of inputs, one vector per input back.

use crate::embeddings::{EmbeddingError, EmbeddingProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP client for an embedding inference service
pub struct HttpEmbeddingProvider {
    base_url: String,
    dimension: usize,
    client: reqwest::Client,
}

impl HttpEmbeddingProvider {
    pub fn new(base_url: &str, dimension: usize, timeout_secs: u64) -> Self {
        // A builder carrying only a timeout cannot fail
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("client construction with only a timeout set");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            dimension,
            client,
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
    truncate: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EmbedResponse {
    // TEI /embed returns a bare array of vectors
    Bare(Vec<Vec<f32>>),
    // some deployments wrap it in an object
    Wrapped { embeddings: Vec<Vec<f32>> },
}

impl EmbedResponse {
    fn into_vectors(self) -> Vec<Vec<f32>> {
        match self {
            EmbedResponse::Bare(vectors) => vectors,
            EmbedResponse::Wrapped { embeddings } => embeddings,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let url = format!("{}/embed", self.base_url);
        debug!(count = inputs.len(), "requesting embeddings");

        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                inputs,
                truncate: true,
            })
            .send()
            .await
            .map_err(|e| EmbeddingError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServiceError(format!("{status}: {body}")));
        }

        let vectors = response
            .json::<EmbedResponse>()
            .await
            .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?
            .into_vectors();

        validate_batch(&vectors, inputs.len())?;
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// One non-empty vector per input, all of the same dimension
fn validate_batch(vectors: &[Vec<f32>], expected: usize) -> Result<(), EmbeddingError> {
    if vectors.len() != expected {
        return Err(EmbeddingError::MalformedResponse(format!(
            "expected {expected} vectors, got {}",
            vectors.len()
        )));
    }

    let Some(first) = vectors.first() else {
        return Ok(());
    };
    if first.is_empty() {
        return Err(EmbeddingError::MalformedResponse(
            "service returned zero-dimension vectors".to_string(),
        ));
    }
    if let Some(bad) = vectors.iter().find(|v| v.len() != first.len()) {
        return Err(EmbeddingError::MalformedResponse(format!(
            "inconsistent vector dimensions: {} vs {}",
            first.len(),
            bad.len()
        )));
    }

    Ok(())
}
