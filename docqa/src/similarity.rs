//! Cosine similarity over embedding vectors.

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude, if the lengths differ,
/// or if the result is not finite, so NaN never reaches the ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let similarity = dot / (norm_a * norm_b);
    if similarity.is_finite() { similarity.clamp(-1.0, 1.0) } else { 0.0 }
}
