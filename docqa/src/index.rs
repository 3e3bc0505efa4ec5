//! A loaded document: its corpus plus cached sentence embeddings.

use tracing::{debug, warn};

use crate::corpus::Corpus;
use crate::embedding::EmbeddingProvider;

/// The query-ready form of one document.
///
/// Sentence embeddings are computed once when the document is loaded and
/// reused by every query. A sentence the provider could not embed has no
/// vector; it still provides context for its neighbours but never scores.
#[derive(Debug, Clone, Default)]
pub struct IndexedDocument {
    corpus: Corpus,
    embeddings: Vec<Option<Vec<f32>>>,
}

impl IndexedDocument {
    /// Pair a corpus with precomputed embeddings, one slot per sentence.
    ///
    /// Missing trailing slots are treated as unembedded; extra slots are dropped.
    pub fn new(corpus: Corpus, mut embeddings: Vec<Option<Vec<f32>>>) -> Self {
        embeddings.resize(corpus.len(), None);
        Self { corpus, embeddings }
    }

    /// Embed every corpus sentence, `batch_size` sentences per provider call.
    ///
    /// When a batch fails, its sentences are retried one at a time so a single
    /// bad input only costs that sentence. Failures are logged, never returned.
    pub async fn build(
        corpus: Corpus,
        provider: &dyn EmbeddingProvider,
        batch_size: usize,
    ) -> Self {
        let mut embeddings: Vec<Option<Vec<f32>>> = Vec::with_capacity(corpus.len());
        let expected_dims = provider.dimensions();

        for (batch_index, batch) in corpus.sentences().chunks(batch_size.max(1)).enumerate() {
            let texts: Vec<&str> = batch.iter().map(String::as_str).collect();
            match provider.embed_batch(&texts).await {
                Ok(vectors) if vectors.len() == texts.len() => {
                    embeddings.extend(vectors.into_iter().map(Some));
                }
                Ok(vectors) => {
                    warn!(
                        provider = provider.name(),
                        batch = batch_index,
                        expected = texts.len(),
                        received = vectors.len(),
                        "embedding batch size mismatch, retrying sentence by sentence"
                    );
                    embed_individually(provider, &texts, &mut embeddings).await;
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        batch = batch_index,
                        error = %e,
                        "embedding batch failed, retrying sentence by sentence"
                    );
                    embed_individually(provider, &texts, &mut embeddings).await;
                }
            }
        }

        for (index, slot) in embeddings.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|v| v.len() != expected_dims) {
                warn!(
                    provider = provider.name(),
                    index,
                    expected = expected_dims,
                    "embedding has unexpected dimensionality, sentence will not be scored"
                );
                *slot = None;
            }
        }

        let embedded = embeddings.iter().filter(|e| e.is_some()).count();
        debug!(sentences = corpus.len(), embedded, "corpus embedded");
        Self::new(corpus, embeddings)
    }

    /// The document's corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Number of sentences that have an embedding.
    pub fn embedded_count(&self) -> usize {
        self.embeddings.iter().filter(|e| e.is_some()).count()
    }

    /// Iterate over `(index, sentence, embedding)` for every embedded sentence.
    pub fn embedded_sentences(&self) -> impl Iterator<Item = (usize, &str, &[f32])> {
        self.corpus.iter().zip(self.embeddings.iter()).filter_map(|((index, sentence), embedding)| {
            embedding.as_deref().map(|embedding| (index, sentence, embedding))
        })
    }
}

async fn embed_individually(
    provider: &dyn EmbeddingProvider,
    texts: &[&str],
    embeddings: &mut Vec<Option<Vec<f32>>>,
) {
    for text in texts {
        match provider.embed(text).await {
            Ok(vector) => embeddings.push(Some(vector)),
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    sentence_len = text.len(),
                    "skipping sentence that could not be embedded"
                );
                embeddings.push(None);
            }
        }
    }
}
