mod batch;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::batch::{run_batch, BatchError};

#[derive(Debug, Parser)]
#[command(name = "score-headlines")]
#[command(about = "Use news headlines to predict sentiment using a pre-trained SVM.")]
struct Cli {
    /// Path to a text file with one headline per line
    text_file: PathBuf,

    /// Source of the headlines (e.g. "New York Times")
    source: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = headline_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    println!("Loading models...");
    let model_config = headline_sentiment::ModelConfig::from_app_config(&config);
    let scorer = headline_sentiment::load_models(&model_config)
        .await
        .context("error loading models")?;

    let out_dir = std::env::current_dir().context("cannot resolve working directory")?;
    let today = chrono::Local::now().date_naive();

    println!("Reading from {}...", cli.text_file.display());

    match run_batch(&scorer, &cli.text_file, &cli.source, &out_dir, today).await {
        Ok(output) => println!("Success! Results saved to: {}", output.display()),
        Err(BatchError::InputNotFound(path)) => println!(
            "Error: Could not find '{}'. Make sure the text file is in the specified directory.",
            path.display()
        ),
        Err(e) => {
            tracing::error!(error = %e, "batch scoring failed");
            println!("An unexpected error occurred: {e}");
        }
    }

    Ok(())
}
