//! Most similar comment pair

use crate::embeddings::{similarity, EmbeddingProvider};
use crate::error::{AgentError, AgentResult};
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use std::sync::Arc;

const INPUT: &str = "comments.txt";
const OUTPUT: &str = "comments-similar.txt";

/// Find the semantically closest pair of comments via embedding similarity
pub struct SimilarCommentsTask {
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl SimilarCommentsTask {
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embeddings }
    }
}

/// Ordered, non-empty, trimmed lines
fn usable_fragments(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl TaskHandler for SimilarCommentsTask {
    fn name(&self) -> &str {
        "find_similar_comments"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let content = ctx.workspace.read_to_string(INPUT)?;

        let fragments = usable_fragments(&content);
        if fragments.len() < 2 {
            return Err(AgentError::invalid_format(format!(
                "{INPUT} needs at least 2 comments, found {}",
                fragments.len()
            )));
        }

        let vectors = self
            .embeddings
            .embed_batch(&fragments)
            .await
            .map_err(|e| AgentError::dependency(e.to_string()))?;

        let (i, j) = similarity::most_similar_pair(&vectors)
            .ok_or_else(|| AgentError::internal("pair search on validated batch failed"))?;

        let pair = format!("{}\n{}", fragments[i], fragments[j]);
        ctx.workspace.write_atomic(OUTPUT, &pair)?;

        Ok(format!(
            "Most similar pair of {} comments saved to {OUTPUT}.",
            fragments.len()
        ))
    }
}
