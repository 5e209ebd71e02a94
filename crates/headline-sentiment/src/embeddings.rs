//! Sentence encoder seam and its TEI (Text Embeddings Inference) client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::types::Embedding;

/// Turns raw text into fixed-length vectors.
///
/// Implementations must be deterministic for a fixed model and must return
/// exactly one vector per input, in input order.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Encode a batch of texts.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Encoder`] if the backing model call fails.
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, SentimentError>;

    /// Encode a single text.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Encoder::encode_batch`].
    async fn encode(&self, text: &str) -> Result<Embedding, SentimentError> {
        self.encode_batch(&[text])
            .await?
            .pop()
            .ok_or_else(|| SentimentError::Encoder("encoder returned no embedding".to_string()))
    }
}

/// Subset of TEI's `/info` response used to verify the served model.
#[derive(Debug, Clone, Deserialize)]
pub struct TeiInfo {
    pub model_id: String,
    /// Largest `/embed` batch the server accepts; larger requests get a 413.
    #[serde(default)]
    pub max_client_batch_size: Option<usize>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
    /// Match sentence-transformers, which silently truncates to the model's
    /// max sequence length instead of rejecting long inputs.
    truncate: bool,
}

/// TEI HTTP client.
///
/// Built without a request timeout: a stuck embed call blocks its caller.
#[derive(Debug, Clone)]
pub struct TeiClient {
    client: reqwest::Client,
    base_url: String,
    batch_size: usize,
}

impl TeiClient {
    /// Create a new `TeiClient`. A `batch_size` of zero is treated as one.
    #[must_use]
    pub fn new(base_url: &str, batch_size: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            batch_size: batch_size.max(1),
        }
    }

    /// Number of texts sent per `/embed` call.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Replace the per-request batch size. Zero is treated as one.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Fetch `/info` to learn which model the server is hosting.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelLoad`] if the server is unreachable,
    /// answers with a non-success status, or sends an unparseable body.
    pub async fn info(&self) -> Result<TeiInfo, SentimentError> {
        let url = format!("{}/info", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SentimentError::ModelLoad(format!("TEI unreachable at {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::ModelLoad(format!(
                "TEI /info returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SentimentError::ModelLoad(format!("TEI /info parse error: {e}")))
    }
}

#[async_trait]
impl Encoder for TeiClient {
    /// Texts are sent in groups of `batch_size` per request.
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, SentimentError> {
        let url = format!("{}/embed", self.base_url);
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let request = EmbedRequest {
                inputs: chunk,
                truncate: true,
            };
            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| SentimentError::Encoder(format!("TEI request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(SentimentError::Encoder(format!(
                    "TEI returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Embedding> = response
                .json()
                .await
                .map_err(|e| SentimentError::Encoder(format!("TEI response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(SentimentError::Encoder(format!(
                    "TEI returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            all_embeddings.extend(embeddings);
        }

        tracing::debug!(
            inputs = texts.len(),
            requests = texts.len().div_ceil(self.batch_size),
            "encoded batch via TEI"
        );
        Ok(all_embeddings)
    }
}
