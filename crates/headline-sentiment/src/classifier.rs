//! Classifier seam and the linear SVM loaded from a JSON artifact.
//!
//! The artifact carries the fitted parameters of a linear SVM:
//!
//! ```json
//! {
//!   "classes": ["Neutral", "Optimistic", "Pessimistic"],
//!   "coef": [[0.12, -0.40, ...], [...], [...]],
//!   "intercept": [-0.31, 0.05, -0.22]
//! }
//! ```
//!
//! Multi-class models hold one one-vs-rest row per class. Binary models hold
//! a single row whose positive side is `classes[1]`.

use std::path::Path;

use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::Label;

/// Maps embeddings to discrete labels.
pub trait Classifier: Send + Sync {
    /// Feature dimension the classifier was trained on.
    fn dimension(&self) -> usize;

    /// Predict the label for one embedding.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::DimensionMismatch`] if `embedding` has the
    /// wrong length.
    fn predict(&self, embedding: &[f32]) -> Result<Label, SentimentError>;

    /// Predict labels for a batch, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first embedding that [`Classifier::predict`] rejects.
    fn predict_batch(&self, embeddings: &[Vec<f32>]) -> Result<Vec<Label>, SentimentError> {
        embeddings.iter().map(|e| self.predict(e)).collect()
    }
}

#[derive(Debug, Deserialize)]
struct LinearSvmArtifact {
    classes: Vec<String>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

/// Linear SVM decision function over sentence embeddings.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    classes: Vec<Label>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
    dimension: usize,
}

impl LinearSvm {
    /// Load and validate an artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ClassifierMissing`] if the file does not
    /// exist, [`SentimentError::Io`] if it cannot be read, and
    /// [`SentimentError::ClassifierInvalid`] if its contents are malformed.
    pub fn from_path(path: &Path) -> Result<Self, SentimentError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SentimentError::ClassifierMissing(path.to_path_buf())
            } else {
                SentimentError::Io(e)
            }
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate an artifact from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ClassifierInvalid`] if the JSON is malformed
    /// or the parameters are inconsistent.
    pub fn from_json_str(raw: &str) -> Result<Self, SentimentError> {
        let artifact: LinearSvmArtifact = serde_json::from_str(raw)
            .map_err(|e| SentimentError::ClassifierInvalid(e.to_string()))?;
        Self::from_parts(artifact.classes, artifact.coef, artifact.intercept)
    }

    /// Build from raw parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ClassifierInvalid`] when the shapes disagree,
    /// fewer than two classes are given, or any parameter is not finite.
    pub fn from_parts(
        classes: Vec<String>,
        coef: Vec<Vec<f32>>,
        intercept: Vec<f32>,
    ) -> Result<Self, SentimentError> {
        let invalid =
            |msg: String| -> Result<Self, SentimentError> { Err(SentimentError::ClassifierInvalid(msg)) };

        if classes.len() < 2 {
            return invalid(format!("need at least 2 classes, got {}", classes.len()));
        }

        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows {
            return invalid(format!(
                "{} classes require {expected_rows} coefficient rows, got {}",
                classes.len(),
                coef.len()
            ));
        }
        if intercept.len() != coef.len() {
            return invalid(format!(
                "intercept has {} entries for {} coefficient rows",
                intercept.len(),
                coef.len()
            ));
        }

        let dimension = coef[0].len();
        if dimension == 0 {
            return invalid("coefficient rows are empty".to_string());
        }
        if let Some((i, row)) = coef.iter().enumerate().find(|(_, r)| r.len() != dimension) {
            return invalid(format!(
                "coefficient row {i} has {} weights, expected {dimension}",
                row.len()
            ));
        }
        if !coef.iter().flatten().chain(&intercept).all(|w| w.is_finite()) {
            return invalid("parameters contain NaN or infinite values".to_string());
        }

        Ok(Self {
            classes: classes.into_iter().map(Label::new).collect(),
            coef,
            intercept,
            dimension,
        })
    }

    #[must_use]
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn decision(&self, row: usize, embedding: &[f32]) -> f32 {
        let dot: f32 = self.coef[row]
            .iter()
            .zip(embedding)
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept[row]
    }
}

impl Classifier for LinearSvm {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn predict(&self, embedding: &[f32]) -> Result<Label, SentimentError> {
        if embedding.len() != self.dimension {
            return Err(SentimentError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let index = if self.coef.len() == 1 {
            usize::from(self.decision(0, embedding) > 0.0)
        } else {
            // Strict `>` keeps the lowest index on ties.
            let mut best = 0;
            let mut best_score = self.decision(0, embedding);
            for row in 1..self.coef.len() {
                let score = self.decision(row, embedding);
                if score > best_score {
                    best = row;
                    best_score = score;
                }
            }
            best
        };

        Ok(self.classes[index].clone())
    }
}
