use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twittp::config::Config;
use twittp::distance::MetricKind;

mod commands;

use commands::BuildModelParams;

#[derive(Parser)]
#[command(
    name = "twittp",
    version,
    about = "twittp -- Twitter Trend Prediction",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file (defaults come from TWITTP_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a model for other actions in twittp
    BuildModel {
        /// The JSON file containing tweets, one per line
        tweets: PathBuf,

        /// The JSON file containing trend snapshots, one per line
        trends: PathBuf,

        /// Optional file of words to ignore when constructing the model
        #[arg(long)]
        stopword: Option<PathBuf>,

        /// Where to write the model
        #[arg(short, long, default_value = "model.json")]
        output: PathBuf,

        /// Seed for negative trend sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Test the performance of a model using leave-one-out testing
    LooTest {
        /// The JSON file containing the model created by build-model
        model: PathBuf,

        /// Distance metric for nearest-neighbor search
        #[arg(short, long, value_enum)]
        metric: Option<MetricKind>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    config.validate().context("Invalid configuration")?;

    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose)?;

    match cli.command {
        Commands::BuildModel {
            tweets,
            trends,
            stopword,
            output,
            seed,
        } => {
            if let Some(seed) = seed {
                config.model.seed = Some(seed);
            }
            tracing::info!(
                tweets = %tweets.display(),
                trends = %trends.display(),
                stopword = ?stopword,
                output = %output.display(),
                "Starting build-model command"
            );
            commands::build_model(
                &mut std::io::stdout().lock(),
                &config,
                BuildModelParams {
                    tweets,
                    trends,
                    stopword,
                    output,
                },
            )?;
        }

        Commands::LooTest { model, metric } => {
            tracing::info!(
                model = %model.display(),
                metric = ?metric,
                "Starting loo-test command"
            );
            commands::loo_test(&mut std::io::stdout().lock(), &config, &model, metric)?;
        }
    }

    Ok(())
}

fn setup_tracing(level: &str, format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("twittp=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("twittp={level},warn")))
    };

    // stdout is reserved for command results
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
