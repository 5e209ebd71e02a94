//! One-shot model loading for process start-up.

use crate::classifier::{Classifier, LinearSvm};
use crate::embeddings::{Encoder, TeiClient};
use crate::error::SentimentError;
use crate::pipeline::Scorer;
use crate::types::{Label, ModelConfig};

/// Text embedded once at load time to learn the encoder's output dimension.
const PROBE_TEXT: &str = "status";

/// Load the classifier artifact and connect to the encoder.
///
/// 1. Read and validate the classifier JSON.
/// 2. Ask TEI which model it serves and compare it with `embedding_model`.
///    The per-request batch size is capped at TEI's `max_client_batch_size`.
/// 3. Embed a probe string and check the dimension against the classifier.
///
/// Each step is attempted once. There is no fallback model.
///
/// # Errors
///
/// Returns [`SentimentError::ClassifierMissing`] or
/// [`SentimentError::ClassifierInvalid`] for a bad artifact,
/// [`SentimentError::ModelLoad`] if TEI is unreachable or serves another
/// model, and [`SentimentError::DimensionMismatch`] if the two disagree.
pub async fn load_models(config: &ModelConfig) -> Result<Scorer, SentimentError> {
    let classifier = LinearSvm::from_path(&config.classifier_path)?;
    tracing::debug!(
        path = %config.classifier_path.display(),
        classes = classifier.classes().len(),
        "classifier artifact loaded"
    );

    let tei = TeiClient::new(&config.embedding_url, config.embed_batch_size);
    let info = tei.info().await?;
    verify_model_id(&config.embedding_model, &info.model_id)?;

    let batch_size = effective_batch_size(config.embed_batch_size, info.max_client_batch_size);
    if batch_size < config.embed_batch_size {
        tracing::info!(
            configured = config.embed_batch_size,
            server_limit = batch_size,
            "capping embed batch size at TEI max_client_batch_size"
        );
    }
    let tei = tei.with_batch_size(batch_size);

    let probe = tei
        .encode(PROBE_TEXT)
        .await
        .map_err(|e| SentimentError::ModelLoad(format!("probe embed failed: {e}")))?;
    if probe.len() != classifier.dimension() {
        return Err(SentimentError::DimensionMismatch {
            expected: classifier.dimension(),
            actual: probe.len(),
        });
    }

    let classes: Vec<&str> = classifier.classes().iter().map(Label::as_str).collect();
    tracing::info!(
        model_id = %info.model_id,
        batch_size,
        dimension = probe.len(),
        classes = ?classes,
        "models loaded"
    );

    Ok(Scorer::new(Box::new(tei), Box::new(classifier)))
}

/// Accept the served model when its final path segment matches the configured
/// one, so a local path and a hub id for the same model are equivalent.
fn verify_model_id(expected: &str, served: &str) -> Result<(), SentimentError> {
    if model_basename(expected).eq_ignore_ascii_case(model_basename(served)) {
        Ok(())
    } else {
        Err(SentimentError::ModelLoad(format!(
            "TEI serves '{served}', expected '{expected}'"
        )))
    }
}

fn effective_batch_size(configured: usize, server_limit: Option<usize>) -> usize {
    match server_limit {
        Some(limit) if limit > 0 => configured.min(limit),
        _ => configured,
    }
}

fn model_basename(id: &str) -> &str {
    let trimmed = id.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
