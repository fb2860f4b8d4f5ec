//! Configuration management for twittp
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files. Command-line flags override individual values after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::distance::MetricKind;
use crate::error::Error;
use crate::models::{FeatureWeights, DEFAULT_WINDOW_SIZE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model construction configuration
    pub model: ModelConfig,

    /// Distance metric configuration
    pub distance: DistanceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Settings for building a trend model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Seconds per window
    pub window_size: i64,

    /// Shortest positive trend to keep, in windows
    pub minimum_trend_size: usize,

    /// Non-trending windows prepended to each positive trend
    pub trend_preempt: usize,

    /// Fewest words in a synthesized negative trend name
    pub min_name_words: usize,

    /// Most words in a synthesized negative trend name
    pub max_name_words: usize,

    /// Draws allowed per negative name before giving up
    pub max_name_attempts: usize,

    /// Seed for negative trend synthesis (random when unset)
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            minimum_trend_size: 30,
            trend_preempt: 0,
            min_name_words: 1,
            max_name_words: 3,
            max_name_attempts: 10_000,
            seed: None,
        }
    }
}

impl ModelConfig {
    /// Check the values model construction relies on
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.window_size <= 0 {
            return Err(Error::config("window_size must be greater than 0"));
        }

        if self.minimum_trend_size == 0 {
            return Err(Error::config("minimum_trend_size must be greater than 0"));
        }

        if self.min_name_words == 0 || self.min_name_words > self.max_name_words {
            return Err(Error::config(format!(
                "name word range {}..={} is empty",
                self.min_name_words, self.max_name_words
            )));
        }

        if self.max_name_attempts == 0 {
            return Err(Error::config("max_name_attempts must be greater than 0"));
        }

        Ok(())
    }
}

/// Distance metric configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// Metric used for nearest-neighbor search
    pub metric: MetricKind,

    /// Per-feature weights
    pub weights: FeatureWeights,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

/// Parse `key` if it is set, failing on a value that does not parse
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key}={value:?}: {e}")),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ModelConfig::default();
        let default_weights = FeatureWeights::default();

        let metric = match std::env::var("TWITTP_METRIC") {
            Ok(value) => value
                .parse::<MetricKind>()
                .map_err(|e| anyhow::anyhow!("TWITTP_METRIC: {e}"))?,
            Err(_) => MetricKind::default(),
        };

        Ok(Self {
            model: ModelConfig {
                window_size: env_parse("TWITTP_WINDOW_SIZE")?.unwrap_or(defaults.window_size),
                minimum_trend_size: env_parse("TWITTP_MINIMUM_TREND_SIZE")?
                    .unwrap_or(defaults.minimum_trend_size),
                trend_preempt: env_parse("TWITTP_TREND_PREEMPT")?.unwrap_or(defaults.trend_preempt),
                min_name_words: defaults.min_name_words,
                max_name_words: defaults.max_name_words,
                max_name_attempts: env_parse("TWITTP_MAX_NAME_ATTEMPTS")?
                    .unwrap_or(defaults.max_name_attempts),
                seed: env_parse("TWITTP_SEED")?,
            },
            distance: DistanceConfig {
                metric,
                weights: FeatureWeights {
                    count: env_parse("TWITTP_COUNT_WEIGHT")?.unwrap_or(default_weights.count),
                    delta: env_parse("TWITTP_DELTA_WEIGHT")?.unwrap_or(default_weights.delta),
                    delta_delta: env_parse("TWITTP_DELTA_DELTA_WEIGHT")?
                        .unwrap_or(default_weights.delta_delta),
                },
            },
            logging: LoggingConfig {
                level: std::env::var("TWITTP_LOG_LEVEL").unwrap_or_else(|_| String::from("info")),
                format: std::env::var("TWITTP_LOG_FORMAT").unwrap_or_else(|_| String::from("text")),
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;

        let w = &self.distance.weights;
        let weights = [
            ("count", w.count),
            ("delta", w.delta),
            ("delta_delta", w.delta_delta),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{name} weight must be a non-negative finite number, got {value}");
            }
        }

        Ok(())
    }
}
