//! Data types for document sources, ranked hits, and response items.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a document's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk.
    Path(PathBuf),
    /// An in-memory upload with a display name used for logs and errors.
    Bytes {
        /// Display name, usually the original file name.
        name: String,
        /// Raw document bytes.
        data: Vec<u8>,
    },
}

impl DocumentSource {
    /// Create a source pointing at a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    /// Create a source from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes { name: name.into(), data: data.into() }
    }

    /// A human-readable name for this source.
    pub fn display_name(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes { name, .. } => name.clone(),
        }
    }
}

/// A corpus sentence scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHit {
    /// Cosine similarity between the query and the sentence, in `[-1, 1]`.
    pub score: f32,
    /// The matched sentence.
    pub sentence: String,
    /// Position of the sentence in the corpus.
    pub index: usize,
}

/// One answer returned to the caller.
///
/// `context` is the matched sentence joined by single spaces with its
/// neighbours in corpus order (previous and next, when they exist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseItem {
    /// The matched sentence.
    pub answer: String,
    /// The similarity score of the match.
    pub similarity: f32,
    /// The matched sentence with its surrounding sentences.
    pub context: String,
}
