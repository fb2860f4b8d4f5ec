//! Positive trend construction from reported trending windows
//!
//! A topic is often reported for a while, dropped, then reported again. Only
//! the longest stretch of consecutive windows is modeled, and stretches that
//! are too short to be a real trend are discarded.

use crate::ingest::TwitterTrend;
use crate::models::TrendLine;

/// A maximal stretch of consecutive windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// First window start
    pub start: i64,
    /// Number of windows
    pub len: usize,
}

/// Find the longest run of timestamps spaced exactly `window_size` apart
///
/// `timestamps` must be ascending. When several runs share the maximum length
/// the earliest one wins.
pub fn longest_run(timestamps: &[i64], window_size: i64) -> Option<Run> {
    let (&first, rest) = timestamps.split_first()?;

    let mut best = Run { start: first, len: 1 };
    let mut current = best;
    let mut last = first;

    for &ts in rest {
        if ts == last + window_size {
            current.len += 1;
        } else {
            current = Run { start: ts, len: 1 };
        }
        if current.len > best.len {
            best = current;
        }
        last = ts;
    }

    Some(best)
}

impl TrendLine {
    /// Build an unpopulated positive line from the longest run of a trend
    pub fn from_twitter_trend(trend: &TwitterTrend) -> Option<Self> {
        let run = longest_run(&trend.timestamps, trend.window_size)?;
        Some(Self::blank(
            trend.name.clone(),
            run.start,
            trend.window_size,
            run.len,
            true,
        ))
    }
}

/// Turns ingested trends into positive trend lines
#[derive(Debug, Clone, Copy)]
pub struct RunExtractor {
    /// Shortest run kept, in windows
    pub minimum_trend_size: usize,
    /// Non-trending windows prepended to every kept line
    pub trend_preempt: usize,
}

impl RunExtractor {
    pub fn new(minimum_trend_size: usize, trend_preempt: usize) -> Self {
        Self {
            minimum_trend_size,
            trend_preempt,
        }
    }

    /// Extract one positive line per trend whose longest run is long enough
    pub fn extract(&self, trends: &[TwitterTrend]) -> Vec<TrendLine> {
        let mut lines = Vec::with_capacity(trends.len());

        for trend in trends {
            let Some(mut line) = TrendLine::from_twitter_trend(trend) else {
                continue;
            };

            if line.len() < self.minimum_trend_size {
                tracing::debug!(
                    name = %trend.name,
                    windows = line.len(),
                    minimum = self.minimum_trend_size,
                    "Discarding short trend"
                );
                continue;
            }

            line.prepend_context(self.trend_preempt);
            lines.push(line);
        }

        tracing::info!(
            candidates = trends.len(),
            kept = lines.len(),
            minimum = self.minimum_trend_size,
            "Extracted positive trends"
        );
        lines
    }
}
