//! Local sentence embeddings using the `fastembed` crate.
//!
//! This module is only available when the `fastembed` feature is enabled.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, error, info};

use crate::embedding::EmbeddingProvider;
use crate::error::{DocQaError, Result};

/// Output dimensionality of `all-MiniLM-L6-v2`.
const MINILM_DIMENSIONS: usize = 384;

/// An [`EmbeddingProvider`] backed by a local `all-MiniLM-L6-v2` ONNX model.
///
/// Loading the model is expensive, so do it once per process and share the
/// provider behind an `Arc`. Inference runs on the blocking thread pool.
///
/// # Example
///
/// ```rust,ignore
/// use docqa::minilm::FastEmbedProvider;
///
/// let provider = FastEmbedProvider::load(None, false)?;
/// let embedding = provider.embed("hello world").await?;
/// ```
#[derive(Clone)]
pub struct FastEmbedProvider {
    model: Arc<TextEmbedding>,
}

impl FastEmbedProvider {
    /// Load the model, downloading it into `cache_dir` on first use.
    pub fn load(cache_dir: Option<PathBuf>, show_download_progress: bool) -> Result<Self> {
        info!(model = "all-MiniLM-L6-v2", "loading embedding model");
        let mut options = InitOptions::default();
        options.model_name = EmbeddingModel::AllMiniLML6V2;
        options.show_download_progress = show_download_progress;
        if let Some(dir) = cache_dir {
            options.cache_dir = dir;
        }

        let model = TextEmbedding::try_new(options).map_err(|e| {
            error!(error = %e, "failed to load embedding model");
            DocQaError::EmbeddingError {
                provider: "FastEmbed".into(),
                message: format!("failed to load model: {e}"),
            }
        })?;
        info!("embedding model loaded");
        Ok(Self { model: Arc::new(model) })
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| DocQaError::EmbeddingError {
            provider: "FastEmbed".into(),
            message: "model returned no embedding".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(provider = "FastEmbed", batch_size = texts.len(), "embedding batch");

        let model = Arc::clone(&self.model);
        let owned: Vec<String> = texts.iter().map(|t| (*t).to_string()).collect();
        let embeddings = tokio::task::spawn_blocking(move || model.embed(owned, None))
            .await
            .map_err(|e| DocQaError::EmbeddingError {
                provider: "FastEmbed".into(),
                message: format!("embedding task panicked: {e}"),
            })?
            .map_err(|e| DocQaError::EmbeddingError {
                provider: "FastEmbed".into(),
                message: format!("inference failed: {e}"),
            })?;

        if embeddings.len() != texts.len() {
            return Err(DocQaError::EmbeddingError {
                provider: "FastEmbed".into(),
                message: format!(
                    "expected {} embeddings, model returned {}",
                    texts.len(),
                    embeddings.len()
                ),
            });
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        MINILM_DIMENSIONS
    }

    fn name(&self) -> &str {
        "FastEmbed"
    }
}
