//! Feature population for trend lines
//!
//! Counts are filled by a single pass over the message corpus. A message
//! matches a line when its timestamp falls inside the line's span and any word
//! of the line's name appears among the message tokens. A second pass over the
//! lines derives `delta` and `delta_delta` from the counts.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::ingest::records::timestamp_error;
use crate::ingest::{JsonLines, MessageRecord, CREATED_AT_FORMAT};
use crate::models::TrendLine;
use crate::utils::token_set;

/// Summary of a counting pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationStats {
    /// Messages read
    pub messages: usize,
    /// Cell increments across all lines
    pub matches: u64,
}

/// Span and name words of one line, computed before the scan
struct LineIndex {
    start: i64,
    end: i64,
    words: Vec<String>,
}

impl LineIndex {
    fn new(trend: &TrendLine) -> Self {
        Self {
            start: trend.start_ts,
            end: trend.end_ts(),
            words: trend.name.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// Increment cell counts for every message matching a line
pub fn populate_counts<R: BufRead>(
    trends: &mut [TrendLine],
    reader: R,
    source_name: &str,
) -> Result<PopulationStats> {
    let index: Vec<LineIndex> = trends.iter().map(LineIndex::new).collect();
    let mut stats = PopulationStats::default();

    for record in JsonLines::<R, MessageRecord>::new(reader, source_name) {
        let (line, message) = record?;
        let ts = message.timestamp().map_err(|_| {
            timestamp_error(source_name, line, &message.created_at, CREATED_AT_FORMAT)
        })?;
        stats.messages += 1;

        let mut tokens = None;
        for (trend, entry) in trends.iter_mut().zip(&index) {
            if ts < entry.start || ts >= entry.end {
                continue;
            }
            let tokens = tokens.get_or_insert_with(|| token_set(&message.text));
            if !entry.words.iter().any(|w| tokens.contains(w.as_str())) {
                continue;
            }

            let offset = ((ts - entry.start) / trend.window_size) as usize;
            trend.data[offset].count += 1;
            stats.matches += 1;
        }
    }

    Ok(stats)
}

/// Derive `delta` and `delta_delta` for every line
pub fn compute_deltas(trends: &mut [TrendLine]) {
    for trend in trends.iter_mut() {
        trend.compute_deltas();
    }
}

/// Run both passes over a message source
pub fn populate_features<R: BufRead>(
    trends: &mut [TrendLine],
    reader: R,
    source_name: &str,
) -> Result<PopulationStats> {
    let stats = populate_counts(trends, reader, source_name)?;
    compute_deltas(trends);

    tracing::info!(
        source = source_name,
        trends = trends.len(),
        messages = stats.messages,
        matches = stats.matches,
        "Populated trend features"
    );
    Ok(stats)
}

/// Run both passes over a message file
pub fn populate_from_file(trends: &mut [TrendLine], path: &Path) -> Result<PopulationStats> {
    let file = File::open(path)
        .map_err(|e| Error::with_source(format!("Failed to open {}", path.display()), e))?;
    populate_features(trends, BufReader::new(file), &path.display().to_string())
}
