//! Question-answering pipeline orchestrator.
//!
//! The [`QaPipeline`] coordinates document loading (extract → segment →
//! deduplicate → embed) and query answering (embed query → rank → assemble
//! context) by composing a [`TextExtractor`], a [`Segmenter`], and an
//! [`EmbeddingProvider`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docqa::{DocumentSource, HashedTokenEmbedder, QaConfig, QaPipeline};
//!
//! let pipeline = QaPipeline::builder()
//!     .config(QaConfig::default())
//!     .embedding_provider(Arc::new(HashedTokenEmbedder::default()))
//!     .build()?;
//!
//! let document = pipeline.load_source(&DocumentSource::from_path("paper.pdf")).await?;
//! let answers = pipeline.ask(&document, "What is the main result?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::QaConfig;
use crate::context::ContextAssembler;
use crate::corpus::Corpus;
use crate::document::{DocumentSource, ResponseItem};
use crate::embedding::EmbeddingProvider;
use crate::error::{DocQaError, Result};
use crate::extract::{AutoExtractor, TextExtractor, flatten_pages};
use crate::index::IndexedDocument;
use crate::ranker::SimilarityRanker;
use crate::segment::{Segmenter, SentenceSegmenter};

/// The QA pipeline orchestrator.
///
/// Holds only the long-lived collaborators and configuration; each loaded
/// document is returned to the caller as an [`IndexedDocument`]. Construct
/// one via [`QaPipeline::builder()`].
pub struct QaPipeline {
    config: QaConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    extractor: Arc<dyn TextExtractor>,
    segmenter: Arc<dyn Segmenter>,
    ranker: SimilarityRanker,
    assembler: ContextAssembler,
}

impl QaPipeline {
    /// Create a new [`QaPipelineBuilder`].
    pub fn builder() -> QaPipelineBuilder {
        QaPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Load a document: extract → flatten → segment → deduplicate → embed.
    ///
    /// A document with no extractable text loads as an empty corpus.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ExtractionError`] or [`DocQaError::Io`] if the
    /// document cannot be read; no corpus is built in that case.
    pub async fn load_source(&self, source: &DocumentSource) -> Result<IndexedDocument> {
        let name = source.display_name();
        let pages = self.extractor.extract_pages(source).map_err(|e| {
            error!(source = %name, error = %e, "document extraction failed");
            e
        })?;
        let text = flatten_pages(&pages);
        info!(source = %name, pages = pages.len(), chars = text.len(), "extracted document text");
        self.load_text(&text).await
    }

    /// Load already-extracted document text: segment → deduplicate → embed.
    pub async fn load_text(&self, text: &str) -> Result<IndexedDocument> {
        let sentences = self.segmenter.segment(text);
        let sentence_count = sentences.len();
        let corpus = Corpus::from_sentences(sentences);

        let document = IndexedDocument::build(
            corpus,
            self.embedding_provider.as_ref(),
            self.config.embed_batch_size,
        )
        .await;

        info!(
            sentences = sentence_count,
            corpus_size = document.corpus().len(),
            embedded = document.embedded_count(),
            "loaded document"
        );
        Ok(document)
    }

    /// Answer a query with the configured number of responses.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::PipelineError`] if the query cannot be embedded.
    pub async fn ask(&self, document: &IndexedDocument, query: &str) -> Result<Vec<ResponseItem>> {
        self.ask_top_k(document, query, self.config.num_responses).await
    }

    /// Answer a query, returning at most `top_k` responses.
    ///
    /// The query is embedded exactly once. An empty corpus returns an empty
    /// result without calling the embedding provider.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::PipelineError`] if the query cannot be embedded.
    pub async fn ask_top_k(
        &self,
        document: &IndexedDocument,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ResponseItem>> {
        if document.corpus().is_empty() || top_k == 0 {
            info!(result_count = 0, "query completed (nothing to rank)");
            return Ok(Vec::new());
        }

        // 1. Embed the query
        let query_embedding = self.embedding_provider.embed(query).await.map_err(|e| {
            error!(provider = self.embedding_provider.name(), error = %e, "query embedding failed");
            DocQaError::PipelineError(format!("query embedding failed: {e}"))
        })?;

        // 2. Score and rank every embedded sentence
        let hits = self.ranker.rank(document, &query_embedding, top_k);

        // 3. Attach surrounding context
        let responses = self.assembler.assemble_all(document.corpus(), &hits);

        info!(
            result_count = responses.len(),
            top_score = ?responses.first().map(|r| r.similarity),
            "query completed"
        );
        Ok(responses)
    }
}

/// Builder for constructing a [`QaPipeline`].
///
/// The embedding provider is required. The extractor defaults to
/// [`AutoExtractor`] and the segmenter to a [`SentenceSegmenter`] using the
/// configured `min_sentence_chars`.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = QaPipeline::builder()
///     .config(QaConfig::builder().num_responses(5).build()?)
///     .embedding_provider(Arc::new(embedder))
///     .extractor(Arc::new(PlainTextExtractor))  // optional
///     .build()?;
/// ```
#[derive(Default)]
pub struct QaPipelineBuilder {
    config: Option<QaConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    extractor: Option<Arc<dyn TextExtractor>>,
    segmenter: Option<Arc<dyn Segmenter>>,
}

impl QaPipelineBuilder {
    /// Set the pipeline configuration. Defaults to [`QaConfig::default()`].
    pub fn config(mut self, config: QaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the text extractor.
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the sentence segmenter.
    pub fn segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Build the [`QaPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ConfigError`] if the embedding provider is
    /// missing or the config fails [`QaConfig::validate`].
    pub fn build(self) -> Result<QaPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| DocQaError::ConfigError("embedding_provider is required".to_string()))?;
        let extractor = self.extractor.unwrap_or_else(|| Arc::new(AutoExtractor));
        let segmenter = self
            .segmenter
            .unwrap_or_else(|| Arc::new(SentenceSegmenter::new(config.min_sentence_chars)));

        Ok(QaPipeline {
            config,
            embedding_provider,
            extractor,
            segmenter,
            ranker: SimilarityRanker,
            assembler: ContextAssembler,
        })
    }
}
