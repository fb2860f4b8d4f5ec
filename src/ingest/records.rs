//! Line-delimited JSON input records
//!
//! Both input files hold one JSON object per line. [`JsonLines`] reads them
//! lazily, keeps track of line numbers for error reporting and skips blank
//! lines.

use chrono::{DateTime, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{Error, Result};

/// Format of a message's `created_at` field
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Format of a trend snapshot's `as_of` field
pub const AS_OF_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A cleaned message, one per line of the tweet file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user_followers: Option<u64>,
}

impl MessageRecord {
    /// Creation time in UTC seconds
    pub fn timestamp(&self) -> std::result::Result<i64, chrono::ParseError> {
        parse_created_at(&self.created_at)
    }
}

/// One poll of the trending-topics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub as_of: String,
    pub trends: Vec<TrendEntry>,
}

/// A single topic listed in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendEntry {
    pub name: String,
}

impl TrendSnapshot {
    /// Snapshot time in UTC seconds
    pub fn timestamp(&self) -> std::result::Result<i64, chrono::ParseError> {
        parse_as_of(&self.as_of)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trends.iter().map(|t| t.name.as_str())
    }
}

/// Parse a `created_at` value such as `Mon Oct 17 21:05:33 +0000 2011`
pub fn parse_created_at(value: &str) -> std::result::Result<i64, chrono::ParseError> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT).map(|dt| dt.timestamp())
}

/// Parse an `as_of` value such as `2011-10-17T21:05:33Z`
pub fn parse_as_of(value: &str) -> std::result::Result<i64, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, AS_OF_FORMAT).map(|dt| dt.and_utc().timestamp())
}

/// Iterator over the JSON records of a line-delimited source
///
/// Yields `(line_number, record)` pairs with 1-based line numbers.
pub struct JsonLines<R, T> {
    reader: R,
    buf: Vec<u8>,
    source_name: String,
    line_no: usize,
    _record: PhantomData<T>,
}

impl<R: BufRead, T: DeserializeOwned> JsonLines<R, T> {
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            source_name: source_name.into(),
            line_no: 0,
            _record: PhantomData,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl<T: DeserializeOwned> JsonLines<BufReader<File>, T> {
    /// Open a file for reading records
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::with_source(format!("Failed to open {}", path.display()), e)
        })?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead, T: DeserializeOwned> Iterator for JsonLines<R, T> {
    type Item = Result<(usize, T)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(Error::malformed(
                        &self.source_name,
                        self.line_no,
                        format!("invalid UTF-8: {e}"),
                    )))
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str::<T>(line)
                    .map(|record| (self.line_no, record))
                    .map_err(|e| Error::malformed(&self.source_name, self.line_no, e.to_string())),
            );
        }
    }
}

/// Build the error for a timestamp that failed to parse
pub fn timestamp_error(source_name: &str, line: usize, value: &str, format: &'static str) -> Error {
    Error::TimestampParse {
        source_name: source_name.to_string(),
        line,
        value: value.to_string(),
        format,
    }
}
