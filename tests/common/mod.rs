//! Common test utilities

#![allow(dead_code)]

use chrono::DateTime;
use std::io::Write;
use std::path::{Path, PathBuf};

use twittp::ingest::{AS_OF_FORMAT, CREATED_AT_FORMAT};
use twittp::models::TrendLine;

/// 2011-10-17T21:00:00Z, aligned to a two-minute window
pub const BASE_TS: i64 = 1_318_885_200;

/// Format a timestamp the way the trends endpoint does
pub fn as_of(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .unwrap()
        .format(AS_OF_FORMAT)
        .to_string()
}

/// Format a timestamp the way tweets carry it
pub fn created_at(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .unwrap()
        .format(CREATED_AT_FORMAT)
        .to_string()
}

/// One line of a trend snapshot file
pub fn snapshot_line(ts: i64, names: &[&str]) -> String {
    let trends: Vec<_> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name, "url": "http://twitter.com/search" }))
        .collect();
    serde_json::json!({ "as_of": as_of(ts), "trends": trends }).to_string()
}

/// One line of a cleaned tweet file
pub fn message_line(ts: i64, text: &str) -> String {
    serde_json::json!({
        "text": text,
        "created_at": created_at(ts),
        "id": 1,
        "user_id": 2,
        "user_followers": 3
    })
    .to_string()
}

/// Write lines to `dir/name` and return the path
pub fn write_lines(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

/// A populated line with the given counts
pub fn line_from_counts(name: &str, counts: &[u64], trending: bool) -> TrendLine {
    let mut line = TrendLine::blank(name, BASE_TS, 120, counts.len(), trending);
    for (cell, &count) in line.data.iter_mut().zip(counts) {
        cell.count = count;
    }
    line.compute_deltas();
    line
}
