use crate::modules::hotspot::core::question::ScoredQuestion;

/// Cosine similarity of two vectors. Mismatched lengths and zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Keeps the hits scoring at least `min_similarity`, preserving order.
pub fn retain_similar(results: Vec<ScoredQuestion>, min_similarity: f32) -> Vec<ScoredQuestion> {
    results
        .into_iter()
        .filter(|result| {
            let keep = result.similarity_score >= min_similarity;
            if !keep {
                tracing::debug!(
                    question_id = %result.question_id,
                    similarity = result.similarity_score,
                    "dropping low similarity hit"
                );
            }
            keep
        })
        .collect()
}
