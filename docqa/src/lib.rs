//! # docqa
//!
//! Extractive question answering over a single document.
//!
//! ## Overview
//!
//! A document is turned into a corpus of unique sentences once, at load
//! time, and every sentence is embedded once. Each query is embedded, scored
//! against every sentence by cosine similarity, and the best matches are
//! returned together with their neighbouring sentences as context. Nothing
//! is generated: every answer is a sentence that already exists in the
//! document.
//!
//! - [`SentenceSegmenter`] - splits normalized text into sentences
//! - [`Corpus`] - deduplicated sentences in first-seen order
//! - [`EmbeddingProvider`] - text → vector, loaded once and shared
//! - [`SimilarityRanker`] - top-K cosine ranking with stable tie-breaks
//! - [`ContextAssembler`] - previous/current/next sentence windows
//! - [`QaPipeline`] - orchestrates load and query
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa::{DocumentSource, HashedTokenEmbedder, QaPipeline, render_response_text};
//!
//! let pipeline = QaPipeline::builder()
//!     .embedding_provider(Arc::new(HashedTokenEmbedder::default()))
//!     .build()?;
//! let document = pipeline.load_source(&DocumentSource::from_path("manual.pdf")).await?;
//! let answers = pipeline.ask(&document, "How do I reset the device?").await?;
//! println!("{}", render_response_text(&answers));
//! ```
//!
//! ## Features
//!
//! - `pdf` (default) - PDF text extraction via `pdf-extract`
//! - `fastembed` - local `all-MiniLM-L6-v2` embeddings via `fastembed`

pub mod config;
pub mod context;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod index;
pub mod pipeline;
pub mod ranker;
pub mod response;
pub mod segment;
pub mod similarity;

#[cfg(feature = "fastembed")]
pub mod minilm;

pub use config::{QaConfig, QaConfigBuilder};
pub use context::{ContextAssembler, context_window};
pub use corpus::Corpus;
pub use document::{DocumentSource, ResponseItem, ScoredHit};
pub use embedding::{EmbeddingProvider, HashedTokenEmbedder};
pub use error::{DocQaError, Result};
#[cfg(feature = "pdf")]
pub use extract::PdfTextExtractor;
pub use extract::{AutoExtractor, PlainTextExtractor, TextExtractor, flatten_pages};
pub use index::IndexedDocument;
#[cfg(feature = "fastembed")]
pub use minilm::FastEmbedProvider;
pub use pipeline::{QaPipeline, QaPipelineBuilder};
pub use ranker::SimilarityRanker;
pub use response::render_response_text;
pub use segment::{Segmenter, SentenceSegmenter, normalize_whitespace};
pub use similarity::cosine_similarity;
