//! Expands ranked hits into answers with surrounding context.

use crate::corpus::Corpus;
use crate::document::{ResponseItem, ScoredHit};

/// Builds [`ResponseItem`]s from [`ScoredHit`]s using corpus neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    /// Turn one hit into a response item.
    pub fn assemble(&self, corpus: &Corpus, hit: &ScoredHit) -> ResponseItem {
        ResponseItem {
            answer: hit.sentence.clone(),
            similarity: hit.score,
            context: context_window(corpus, hit.index),
        }
    }

    /// Turn every hit into a response item, preserving rank order.
    pub fn assemble_all(&self, corpus: &Corpus, hits: &[ScoredHit]) -> Vec<ResponseItem> {
        hits.iter().map(|hit| self.assemble(corpus, hit)).collect()
    }
}

/// The sentence at `index` joined by single spaces with the sentences just
/// before and after it, when those exist.
///
/// Returns an empty string when `index` is outside the corpus.
pub fn context_window(corpus: &Corpus, index: usize) -> String {
    let Some(current) = corpus.get(index) else {
        return String::new();
    };

    let mut parts = Vec::with_capacity(3);
    if let Some(previous) = index.checked_sub(1).and_then(|i| corpus.get(i)) {
        parts.push(previous);
    }
    parts.push(current);
    if let Some(next) = corpus.get(index + 1) {
        parts.push(next);
    }
    parts.join(" ")
}
