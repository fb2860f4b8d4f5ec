//! twittp - Twitter Trend Prediction
//!
//! Builds labelled time series of trending-topic activity and measures how well
//! a nearest-neighbor classifier separates real trends from synthetic
//! non-trends.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`ingest`] - Line-delimited JSON readers for tweets and trend snapshots
//! - [`models`] - Trend cells, trend lines and the trend model
//! - [`analytics`] - Run extraction, word model, negative synthesis, features
//! - [`distance`] - Sliding-window and DTW distances between trend lines
//! - [`evaluation`] - Leave-one-out nearest-neighbor evaluation
//! - [`pipeline`] - End-to-end model construction
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use twittp::config::Config;
//! use twittp::distance::DistanceMetric;
//! use twittp::evaluation::LeaveOneOut;
//! use twittp::pipeline::ModelBuilder;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let model = ModelBuilder::new(config.model.clone())
//!         .build(Path::new("tweets.json"), Path::new("trends.json"))?;
//!     let metric = DistanceMetric::new(config.distance.metric, config.distance.weights);
//!     let report = LeaveOneOut::new(metric).evaluate(&model)?;
//!     println!("{}", report.accuracy());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::distance::{DistanceMetric, MetricKind, TrendDistance};
    pub use crate::error::{Error, ErrorCategory, Result, TwittpErrorTrait};
    pub use crate::evaluation::{LeaveOneOut, LooReport};
    pub use crate::models::{FeatureWeights, TrendCell, TrendLine, TrendModel};
    pub use crate::pipeline::ModelBuilder;
}

// Direct re-exports for convenience
pub use models::{FeatureWeights, TrendCell, TrendLine, TrendModel};
