//! Headline sentiment scoring.
//!
//! Embeds headlines with a sentence encoder served by TEI and labels the
//! vectors with a pre-trained linear SVM. Both models are external artifacts;
//! this crate loads them once and orchestrates calls through the [`Encoder`]
//! and [`Classifier`] traits so drivers can be tested with fakes.

pub mod classifier;
pub mod embeddings;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod types;

pub use classifier::{Classifier, LinearSvm};
pub use embeddings::{Encoder, TeiClient};
pub use error::SentimentError;
pub use loader::load_models;
pub use pipeline::Scorer;
pub use types::{Embedding, Label, ModelConfig, ScoredHeadline};
