//! Pairwise cosine similarity
//!
//! Exhaustive comparison over every unordered pair, quadratic by design:
//! inputs are small comment files, not corpora. The tie-break rule is an
//! observable contract: the maximum is tracked with strict greater-than, so
//! the first pair encountered in `(i, j)`, `i < j` enumeration order wins
//! exact ties.

/// Cosine similarity between two vectors; zero when either has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

/// Indices of the most similar pair among the embeddings
///
/// Returns `None` for fewer than two embeddings. Enumeration order is the
/// canonical `i < j` sweep; strict `>` keeps the first maximal pair.
pub fn most_similar_pair(embeddings: &[Vec<f32>]) -> Option<(usize, usize)> {
    if embeddings.len() < 2 {
        return None;
    }

    let mut best = (0, 1);
    let mut best_score = f32::NEG_INFINITY;
    for i in 0..embeddings.len() {
        for j in (i + 1)..embeddings.len() {
            let score = cosine_similarity(&embeddings[i], &embeddings[j]);
            if score > best_score {
                best_score = score;
                best = (i, j);
            }
        }
    }

    Some(best)
}
