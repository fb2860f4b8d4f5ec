//! Distance metrics between trend lines
//!
//! Every metric implements [`TrendDistance`] and carries its own
//! [`FeatureWeights`]. [`DistanceMetric`] selects one of the built-in metrics
//! at runtime from a [`MetricKind`].

pub mod dtw;
pub mod sliding;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{FeatureWeights, TrendLine};

pub use dtw::DynamicTimeWarping;
pub use sliding::{Alignment, SlidingWindow};

/// A symmetric dissimilarity between two trend lines
pub trait TrendDistance {
    fn distance(&self, a: &TrendLine, b: &TrendLine) -> f64;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Built-in metric selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Best one-to-one placement of the shorter line in the longer
    #[default]
    SlidingWindow,
    /// Dynamic time warping
    Dtw,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SlidingWindow => "sliding-window",
            Self::Dtw => "dtw",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sliding-window" | "sliding_window" | "sliding" => Ok(Self::SlidingWindow),
            "dtw" => Ok(Self::Dtw),
            other => Err(format!("unknown metric '{other}' (expected sliding-window or dtw)")),
        }
    }
}

/// Runtime choice of metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMetric {
    SlidingWindow(SlidingWindow),
    Dtw(DynamicTimeWarping),
}

impl DistanceMetric {
    pub fn new(kind: MetricKind, weights: FeatureWeights) -> Self {
        match kind {
            MetricKind::SlidingWindow => Self::SlidingWindow(SlidingWindow::new(weights)),
            MetricKind::Dtw => Self::Dtw(DynamicTimeWarping::new(weights)),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Self::SlidingWindow(_) => MetricKind::SlidingWindow,
            Self::Dtw(_) => MetricKind::Dtw,
        }
    }

    pub fn weights(&self) -> FeatureWeights {
        match self {
            Self::SlidingWindow(m) => m.weights,
            Self::Dtw(m) => m.weights,
        }
    }
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::new(MetricKind::default(), FeatureWeights::default())
    }
}

impl TrendDistance for DistanceMetric {
    fn distance(&self, a: &TrendLine, b: &TrendLine) -> f64 {
        match self {
            Self::SlidingWindow(m) => m.distance(a, b),
            Self::Dtw(m) => m.distance(a, b),
        }
    }

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}
