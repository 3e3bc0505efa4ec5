//! Top-K ranking of corpus sentences against a query embedding.

use std::cmp::Ordering;

use crate::document::ScoredHit;
use crate::index::IndexedDocument;
use crate::similarity::cosine_similarity;

/// Scores every embedded corpus sentence against a query and keeps the best `top_k`.
///
/// Hits are ordered by descending similarity; equal scores keep ascending
/// corpus index. Sentences whose embedding is missing (because the provider
/// failed on them at load time) are not scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker;

impl SimilarityRanker {
    /// Rank the document's sentences against `query_embedding`.
    ///
    /// Returns at most `top_k` hits. An empty corpus yields an empty result.
    pub fn rank(
        &self,
        document: &IndexedDocument,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Vec<ScoredHit> {
        let mut scored: Vec<ScoredHit> = document
            .embedded_sentences()
            .map(|(index, sentence, embedding)| ScoredHit {
                score: cosine_similarity(query_embedding, embedding),
                sentence: sentence.to_string(),
                index,
            })
            .collect();

        scored.sort_by(compare_hits);
        scored.truncate(top_k);
        scored
    }
}

fn compare_hits(a: &ScoredHit, b: &ScoredHit) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index))
}
