use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("classifier artifact not found: {}", .0.display())]
    ClassifierMissing(PathBuf),

    #[error("invalid classifier artifact: {0}")]
    ClassifierInvalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("embedding model load failed: {0}")]
    ModelLoad(String),

    #[error("TEI embed error: {0}")]
    Encoder(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
