//! Configuration for the question-answering pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{DocQaError, Result};

/// Configuration parameters for the QA pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QaConfig {
    /// Number of answers returned per query (K).
    pub num_responses: usize,
    /// Fragments whose trimmed length is at most this many characters are dropped.
    pub min_sentence_chars: usize,
    /// Number of corpus sentences sent to the embedding provider per call.
    pub embed_batch_size: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self { num_responses: 3, min_sentence_chars: 10, embed_batch_size: 32 }
    }
}

impl QaConfig {
    /// Create a new builder for constructing a [`QaConfig`].
    pub fn builder() -> QaConfigBuilder {
        QaConfigBuilder::default()
    }

    /// Check that the parameters are usable.
    ///
    /// Deserialized configs bypass the builder; [`QaPipelineBuilder::build`]
    /// runs this check on whatever config it is given.
    ///
    /// [`QaPipelineBuilder::build`]: crate::QaPipelineBuilder::build
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ConfigError`] if:
    /// - `num_responses == 0`
    /// - `embed_batch_size == 0`
    pub fn validate(&self) -> Result<()> {
        if self.num_responses == 0 {
            return Err(DocQaError::ConfigError(
                "num_responses must be greater than zero".to_string(),
            ));
        }
        if self.embed_batch_size == 0 {
            return Err(DocQaError::ConfigError(
                "embed_batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`QaConfig`].
#[derive(Debug, Clone, Default)]
pub struct QaConfigBuilder {
    config: QaConfig,
}

impl QaConfigBuilder {
    /// Set the number of answers returned per query.
    pub fn num_responses(mut self, k: usize) -> Self {
        self.config.num_responses = k;
        self
    }

    /// Set the sentence length threshold.
    pub fn min_sentence_chars(mut self, chars: usize) -> Self {
        self.config.min_sentence_chars = chars;
        self
    }

    /// Set how many sentences are embedded per provider call.
    pub fn embed_batch_size(mut self, size: usize) -> Self {
        self.config.embed_batch_size = size;
        self
    }

    /// Build the [`QaConfig`], validating it with [`QaConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ConfigError`] if validation fails.
    pub fn build(self) -> Result<QaConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
