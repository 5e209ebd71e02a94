use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fixed-length sentence embedding produced by the encoder.
pub type Embedding = Vec<f32>;

/// Discrete sentiment category, e.g. `Optimistic`, `Pessimistic`, `Neutral`.
///
/// The set of labels is defined by the classifier artifact, not by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A headline paired with its predicted label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredHeadline {
    pub label: Label,
    /// Trimmed headline text.
    pub headline: String,
}

impl fmt::Display for ScoredHeadline {
    /// Renders the batch output line body: `{label}, {headline}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.label, self.headline)
    }
}

/// Where to find the two model artifacts.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub embedding_url: String,
    pub embedding_model: String,
    pub embed_batch_size: usize,
    pub classifier_path: PathBuf,
}

impl ModelConfig {
    #[must_use]
    pub fn from_app_config(config: &headline_core::AppConfig) -> Self {
        Self {
            embedding_url: config.embedding_url.clone(),
            embedding_model: config.embedding_model.clone(),
            embed_batch_size: config.embed_batch_size,
            classifier_path: config.classifier_path.clone(),
        }
    }
}

/// Trim a raw input line, returning `None` when nothing is left to score.
#[must_use]
pub fn normalize_headline(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
