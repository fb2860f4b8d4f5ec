// Core data structures for trend time series

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Default window length in seconds
pub const DEFAULT_WINDOW_SIZE: i64 = 120;

/// Weights applied to each feature when comparing cells
///
/// These are run-wide scoring parameters. They are carried by the distance
/// metric as a plain value rather than stored on the cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    pub count: f64,
    pub delta: f64,
    pub delta_delta: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            count: 1.0,
            delta: 1.0,
            delta_delta: 1.0,
        }
    }
}

impl FeatureWeights {
    /// Weights as an array ordered like [`TrendCell::features`]
    pub fn as_array(&self) -> [f64; 3] {
        [self.count, self.delta, self.delta_delta]
    }
}

/// One window of a trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrendCell {
    /// Whether the topic was reported as trending in this window
    pub trending: bool,
    /// Matching messages in this window
    pub count: u64,
    /// Change in count since the previous window
    pub delta: i64,
    /// Change in delta since the previous window
    pub delta_delta: i64,
}

impl TrendCell {
    /// Create an empty cell with the given label
    pub fn new(trending: bool) -> Self {
        Self {
            trending,
            ..Default::default()
        }
    }

    /// Feature vector `[count, delta, delta_delta]`
    pub fn features(&self) -> [f64; 3] {
        [self.count as f64, self.delta as f64, self.delta_delta as f64]
    }

    /// Weighted L1 distance between two cells
    pub fn distance(&self, other: &Self, weights: &FeatureWeights) -> f64 {
        let a = self.features();
        let b = other.features();
        weights
            .as_array()
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(w, (x, y))| w * (x - y).abs())
            .sum()
    }
}

/// Time-aligned feature series for a single topic
///
/// Cell `i` covers `[start_ts + i * window_size, start_ts + (i + 1) * window_size)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub name: String,
    pub start_ts: i64,
    pub window_size: i64,
    pub data: Vec<TrendCell>,
}

impl TrendLine {
    pub fn new(
        name: impl Into<String>,
        start_ts: i64,
        window_size: i64,
        data: Vec<TrendCell>,
    ) -> Self {
        Self {
            name: name.into(),
            start_ts,
            window_size,
            data,
        }
    }

    /// Create a line of `len` empty cells all labelled `trending`
    pub fn blank(
        name: impl Into<String>,
        start_ts: i64,
        window_size: i64,
        len: usize,
        trending: bool,
    ) -> Self {
        Self::new(name, start_ts, window_size, vec![TrendCell::new(trending); len])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First second after the last window
    pub fn end_ts(&self) -> i64 {
        self.start_ts + self.window_size * self.data.len() as i64
    }

    /// True if any window is labelled trending
    pub fn trending(&self) -> bool {
        self.data.iter().any(|cell| cell.trending)
    }

    /// Index of the cell covering `ts`, if the line covers it
    pub fn cell_index(&self, ts: i64) -> Option<usize> {
        if ts < self.start_ts || ts >= self.end_ts() {
            return None;
        }
        Some(((ts - self.start_ts) / self.window_size) as usize)
    }

    /// Prepend `windows` non-trending cells, moving `start_ts` back
    pub fn prepend_context(&mut self, windows: usize) {
        if windows == 0 {
            return;
        }
        let mut data = vec![TrendCell::new(false); windows];
        data.append(&mut self.data);
        self.data = data;
        self.start_ts -= self.window_size * windows as i64;
    }

    /// Recompute `delta` and `delta_delta` from the counts
    pub fn compute_deltas(&mut self) {
        for i in 0..self.data.len() {
            let delta = if i >= 1 {
                self.data[i].count as i64 - self.data[i - 1].count as i64
            } else {
                0
            };
            self.data[i].delta = delta;
            self.data[i].delta_delta = if i >= 2 {
                delta - self.data[i - 1].delta
            } else {
                0
            };
        }
    }

    pub fn counts(&self) -> Vec<u64> {
        self.data.iter().map(|cell| cell.count).collect()
    }
}

/// Labelled collection of positive and negative trend lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub trends: Vec<TrendLine>,
}

impl TrendModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trends(trends: Vec<TrendLine>) -> Self {
        Self { trends }
    }

    pub fn push(&mut self, trend: TrendLine) {
        self.trends.push(trend);
    }

    pub fn len(&self) -> usize {
        self.trends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrendLine> {
        self.trends.iter()
    }

    /// Look up a line by name
    pub fn get(&self, name: &str) -> Option<&TrendLine> {
        self.trends.iter().find(|t| t.name == name)
    }

    pub fn positive_count(&self) -> usize {
        self.trends.iter().filter(|t| t.trending()).count()
    }

    pub fn negative_count(&self) -> usize {
        self.len() - self.positive_count()
    }

    /// Write the model as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), trends = self.len(), "Model saved");
        Ok(())
    }

    /// Read a model previously written by [`TrendModel::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let model: Self = serde_json::from_reader(reader)?;
        tracing::info!(path = %path.display(), trends = model.len(), "Model loaded");
        Ok(model)
    }
}

impl<'a> IntoIterator for &'a TrendModel {
    type Item = &'a TrendLine;
    type IntoIter = std::slice::Iter<'a, TrendLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.trends.iter()
    }
}
