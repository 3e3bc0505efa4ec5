//! The deduplicated sentence corpus of one loaded document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free sentences of a single document.
///
/// Duplicates are removed by exact string equality, keeping the first
/// occurrence, so corpus order is document order minus repeats. Positional
/// context (previous/next sentence) is taken from this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    sentences: Vec<String>,
}

impl Corpus {
    /// Build a corpus from segmented sentences, dropping exact repeats.
    pub fn from_sentences<I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let sentences =
            sentences.into_iter().filter(|sentence| seen.insert(sentence.clone())).collect();
        Self { sentences }
    }

    /// Number of sentences in the corpus.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// True if the corpus holds no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The sentence at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(String::as_str)
    }

    /// All sentences in corpus order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Iterate over `(index, sentence)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.sentences.iter().map(String::as_str).enumerate()
    }
}
