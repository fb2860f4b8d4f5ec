use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

use twittp::config::Config;
use twittp::ingest::{load_stopwords, Stopwords};
use twittp::pipeline::ModelBuilder;

/// Arguments of the `build-model` command
#[derive(Debug, Clone)]
pub struct BuildModelParams {
    pub tweets: PathBuf,
    pub trends: PathBuf,
    pub stopword: Option<PathBuf>,
    pub output: PathBuf,
}

/// Build and save a model, then write a one-line summary to `out`
pub fn build_model<W: Write>(
    out: &mut W,
    config: &Config,
    params: BuildModelParams,
) -> Result<()> {
    let stopwords = match &params.stopword {
        Some(path) => load_stopwords(path)?,
        None => Stopwords::new(),
    };

    let model = ModelBuilder::new(config.model.clone())
        .with_stopwords(stopwords)
        .build(&params.tweets, &params.trends)
        .with_context(|| {
            format!(
                "Failed to build model from {} and {}",
                params.tweets.display(),
                params.trends.display()
            )
        })?;

    model
        .save(&params.output)
        .with_context(|| format!("Failed to write model to {}", params.output.display()))?;

    writeln!(
        out,
        "Wrote {} trendlines ({} positive, {} negative) to {}",
        model.len(),
        model.positive_count(),
        model.negative_count(),
        params.output.display()
    )?;
    Ok(())
}
