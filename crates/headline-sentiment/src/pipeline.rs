//! Headline scoring pipeline: encoder followed by classifier.

use crate::classifier::Classifier;
use crate::embeddings::Encoder;
use crate::error::SentimentError;
use crate::types::{normalize_headline, Label, ScoredHeadline};

/// Loaded encoder and classifier handles.
///
/// Built once at process start (see [`crate::load_models`]) and shared
/// read-only afterwards; nothing here mutates after construction.
pub struct Scorer {
    encoder: Box<dyn Encoder>,
    classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("dimension", &self.classifier.dimension())
            .finish_non_exhaustive()
    }
}

impl Scorer {
    #[must_use]
    pub fn new(encoder: Box<dyn Encoder>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            encoder,
            classifier,
        }
    }

    /// Score headlines for the batch file path.
    ///
    /// Lines are trimmed and blank ones are dropped before anything reaches
    /// the encoder. Output order and count match the non-blank inputs.
    ///
    /// # Errors
    ///
    /// Any encoder or classifier failure aborts the whole batch.
    pub async fn score<S: AsRef<str>>(
        &self,
        headlines: &[S],
    ) -> Result<Vec<ScoredHeadline>, SentimentError> {
        let kept: Vec<&str> = headlines
            .iter()
            .filter_map(|h| normalize_headline(h.as_ref()))
            .collect();

        tracing::debug!(
            received = headlines.len(),
            kept = kept.len(),
            "scoring headlines"
        );

        let labels = self.label(&kept).await?;

        Ok(labels
            .into_iter()
            .zip(kept)
            .map(|(label, headline)| ScoredHeadline {
                label,
                headline: headline.to_string(),
            })
            .collect())
    }

    /// Label a batch exactly as given, with no trimming or filtering.
    ///
    /// # Errors
    ///
    /// Any encoder or classifier failure aborts the whole batch.
    pub async fn label<S: AsRef<str>>(&self, headlines: &[S]) -> Result<Vec<Label>, SentimentError> {
        if headlines.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = headlines.iter().map(AsRef::as_ref).collect();
        let embeddings = self.encoder.encode_batch(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(SentimentError::Encoder(format!(
                "encoder returned {} embeddings for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }

        let labels = self.classifier.predict_batch(&embeddings)?;
        tracing::debug!(count = labels.len(), "labelled batch");
        Ok(labels)
    }
}
