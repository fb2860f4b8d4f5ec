//! Trend snapshot ingestion
//!
//! The trending endpoint is polled irregularly, so snapshots do not line up
//! with windows and may leave gaps. [`TrendIngestor`] replays the snapshots in
//! order and marks every window between two polls as active for the names of
//! the earlier poll. A poll's names never become visible before its own
//! window.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use super::records::{timestamp_error, JsonLines, TrendSnapshot, AS_OF_FORMAT};
use crate::error::{Error, Result};
use crate::models::DEFAULT_WINDOW_SIZE;
use crate::utils::align_to_window;

/// A name together with every window it was reported trending in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterTrend {
    pub name: String,
    /// Window starts, ascending and unique
    pub timestamps: Vec<i64>,
    pub window_size: i64,
}

impl TwitterTrend {
    pub fn new(name: impl Into<String>, mut timestamps: Vec<i64>, window_size: i64) -> Self {
        timestamps.sort_unstable();
        timestamps.dedup();
        Self {
            name: name.into(),
            timestamps,
            window_size,
        }
    }

    pub fn with_default_window(name: impl Into<String>, timestamps: Vec<i64>) -> Self {
        Self::new(name, timestamps, DEFAULT_WINDOW_SIZE)
    }
}

/// Accumulates active windows per name from a stream of snapshots
#[derive(Debug)]
pub struct TrendIngestor {
    window_size: i64,
    active: BTreeMap<String, BTreeSet<i64>>,
    last_window: Option<i64>,
    previous: Vec<String>,
    snapshots: usize,
}

impl TrendIngestor {
    pub fn new(window_size: i64) -> Self {
        Self {
            window_size,
            active: BTreeMap::new(),
            last_window: None,
            previous: Vec::new(),
            snapshots: 0,
        }
    }

    /// Window of the most recent snapshot
    pub fn last_window(&self) -> Option<i64> {
        self.last_window
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots
    }

    /// Record a snapshot taken at `as_of` (UTC seconds)
    ///
    /// Windows from the previous snapshot's window up to, but excluding, this
    /// snapshot's window are credited to the previous snapshot's names. A
    /// snapshot falling in the same window as its predecessor replaces it.
    pub fn observe<I, S>(&mut self, as_of: i64, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let window = align_to_window(as_of, self.window_size);

        if let Some(last) = self.last_window {
            if window == last && !self.previous.is_empty() {
                tracing::warn!(window, "Snapshot replaces earlier snapshot in the same window");
            }

            let mut ts = last;
            while ts < window {
                for name in &self.previous {
                    self.active.entry(name.clone()).or_default().insert(ts);
                }
                ts += self.window_size;
            }
        }

        self.last_window = Some(window);
        self.previous = names.into_iter().map(Into::into).collect();
        self.snapshots += 1;
    }

    /// Close the final snapshot's window and emit one trend per name
    pub fn finish(mut self) -> Vec<TwitterTrend> {
        if let Some(last) = self.last_window {
            for name in std::mem::take(&mut self.previous) {
                self.active.entry(name).or_default().insert(last);
            }
        }

        let window_size = self.window_size;
        self.active
            .into_iter()
            .map(|(name, windows)| TwitterTrend {
                name,
                timestamps: windows.into_iter().collect(),
                window_size,
            })
            .collect()
    }

    /// Read snapshots from a JSON-lines source
    ///
    /// Any malformed line, unparsable `as_of` or snapshot older than its
    /// predecessor aborts ingestion.
    pub fn ingest<R: BufRead>(
        reader: R,
        source_name: &str,
        window_size: i64,
    ) -> Result<Vec<TwitterTrend>> {
        let mut ingestor = Self::new(window_size);

        for record in JsonLines::<R, TrendSnapshot>::new(reader, source_name) {
            let (line, snapshot) = record?;
            let as_of = snapshot
                .timestamp()
                .map_err(|_| timestamp_error(source_name, line, &snapshot.as_of, AS_OF_FORMAT))?;

            if let Some(last) = ingestor.last_window() {
                if align_to_window(as_of, window_size) < last {
                    return Err(Error::malformed(
                        source_name,
                        line,
                        format!("snapshot {} is older than the previous snapshot", snapshot.as_of),
                    ));
                }
            }

            ingestor.observe(as_of, snapshot.trends.into_iter().map(|t| t.name));
        }

        let snapshots = ingestor.snapshots();
        let trends = ingestor.finish();
        tracing::info!(
            source = source_name,
            snapshots,
            names = trends.len(),
            "Ingested trend snapshots"
        );
        Ok(trends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn trend<'a>(trends: &'a [TwitterTrend], name: &str) -> &'a TwitterTrend {
        trends.iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn test_previous_names_fill_gap() {
        let mut ingestor = TrendIngestor::new(120);
        ingestor.observe(0, ["a"]);
        ingestor.observe(360, ["b"]);
        let trends = ingestor.finish();

        assert_eq!(trend(&trends, "a").timestamps, vec![0, 120, 240]);
        assert_eq!(trend(&trends, "b").timestamps, vec![360]);
    }

    #[test]
    fn test_rounding_to_window() {
        let mut ingestor = TrendIngestor::new(120);
        ingestor.observe(59, ["a"]);
        ingestor.observe(185, ["a"]);
        let trends = ingestor.finish();

        assert_eq!(trend(&trends, "a").timestamps, vec![0, 120]);
    }

    #[test]
    fn test_same_window_snapshot_replaces() {
        let mut ingestor = TrendIngestor::new(120);
        ingestor.observe(0, ["a"]);
        ingestor.observe(30, ["b"]);
        ingestor.observe(120, ["c"]);
        let trends = ingestor.finish();

        assert!(trends.iter().all(|t| t.name != "a"));
        assert_eq!(trend(&trends, "b").timestamps, vec![0]);
        assert_eq!(trend(&trends, "c").timestamps, vec![120]);
    }

    #[test]
    fn test_empty_input() {
        let trends = TrendIngestor::ingest(Cursor::new(""), "trends", 120).unwrap();
        assert!(trends.is_empty());
    }

    #[test]
    fn test_ingest_from_json_lines() {
        let input = concat!(
            "{\"as_of\":\"2011-10-17T21:00:10Z\",\"trends\":[{\"name\":\"#ows\"},{\"name\":\"Steve Jobs\"}]}\n",
            "{\"as_of\":\"2011-10-17T21:05:00Z\",\"trends\":[{\"name\":\"#ows\"}]}\n",
        );
        let trends = TrendIngestor::ingest(Cursor::new(input), "trends", 120).unwrap();

        let base = 1_318_885_200;
        assert_eq!(trend(&trends, "#ows").timestamps, vec![base, base + 120, base + 240]);
        assert_eq!(trend(&trends, "Steve Jobs").timestamps, vec![base, base + 120]);
    }

    #[test]
    fn test_ingest_bad_timestamp_is_fatal() {
        let input = concat!(
            "{\"as_of\":\"2011-10-17T21:00:10Z\",\"trends\":[]}\n",
            "{\"as_of\":\"17/10/2011\",\"trends\":[]}\n",
        );
        let err = TrendIngestor::ingest(Cursor::new(input), "trends.json", 120).unwrap_err();
        assert!(matches!(err, Error::TimestampParse { line: 2, .. }));
    }

    #[test]
    fn test_ingest_missing_as_of_is_fatal() {
        let input = "{\"trends\":[{\"name\":\"x\"}]}\n";
        let err = TrendIngestor::ingest(Cursor::new(input), "trends.json", 120).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_ingest_out_of_order_is_fatal() {
        let input = concat!(
            "{\"as_of\":\"2011-10-17T21:10:00Z\",\"trends\":[]}\n",
            "{\"as_of\":\"2011-10-17T21:00:00Z\",\"trends\":[]}\n",
        );
        let err = TrendIngestor::ingest(Cursor::new(input), "trends.json", 120).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_twitter_trend_sorts_and_dedupes() {
        let t = TwitterTrend::with_default_window("x", vec![240, 0, 120, 0]);
        assert_eq!(t.timestamps, vec![0, 120, 240]);
        assert_eq!(t.window_size, 120);
    }
}
