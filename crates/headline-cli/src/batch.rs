//! File-to-file batch scoring.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use headline_sentiment::{Scorer, SentimentError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum BatchError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Scoring(#[from] SentimentError),
}

/// `headline_scores_{source}_{YYYY_MM_DD}.txt`, with spaces in `source`
/// replaced by underscores.
pub(crate) fn output_filename(source: &str, date: NaiveDate) -> String {
    format!(
        "headline_scores_{}_{}.txt",
        source.replace(' ', "_"),
        date.format("%Y_%m_%d")
    )
}

/// Score every non-blank line of `input` and write `{label}, {headline}`
/// lines into `out_dir`.
///
/// Scoring completes before the output file is opened, so a failed run
/// leaves no output behind.
///
/// # Errors
///
/// Returns [`BatchError::InputNotFound`] if `input` does not exist, and
/// [`BatchError::Io`] or [`BatchError::Scoring`] for anything else.
pub(crate) async fn run_batch(
    scorer: &Scorer,
    input: &Path,
    source: &str,
    out_dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, BatchError> {
    let raw = tokio::fs::read_to_string(input).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BatchError::InputNotFound(input.to_path_buf())
        } else {
            BatchError::Io(e)
        }
    })?;

    let lines: Vec<&str> = raw.lines().collect();
    let scored = scorer.score(&lines).await?;

    let body: String = scored.iter().map(|item| format!("{item}\n")).collect();

    let output = out_dir.join(output_filename(source, today));
    tokio::fs::write(&output, body).await?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        lines = lines.len(),
        scored = scored.len(),
        "batch scoring complete"
    );
    Ok(output)
}
