//! Unified error handling for the twittp crate
//!
//! Every stage of the model pipeline reports failures through the single
//! [`Error`] enum defined here. Input errors always carry the source name and
//! line number of the offending record so a failed run can be traced back to
//! the exact line of the tweet or trend file.
//!
//! # Architecture
//!
//! - [`TwittpErrorTrait`] - Common interface for classifying errors
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum
//!
//! # Usage
//!
//! ```rust,ignore
//! use twittp::error::{Error, TwittpErrorTrait};
//!
//! fn report(err: &Error) {
//!     eprintln!("[{}] {err}", err.category());
//! }
//! ```

use std::io;
use thiserror::Error;

/// Common trait for twittp error types
pub trait TwittpErrorTrait: std::error::Error {
    /// Check if this error is recoverable (the same run could succeed on retry)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input records and timestamps
    Input,
    /// Model construction and evaluation errors
    Model,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Model => "model",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for the twittp crate
#[derive(Error, Debug)]
pub enum Error {
    /// A line that is not valid JSON or lacks a required field
    #[error("Malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// A `created_at` or `as_of` value that does not match its format
    #[error("Unparsable timestamp '{value}' in {source_name} at line {line} (expected format {format})")]
    TimestampParse {
        source_name: String,
        line: usize,
        value: String,
        format: &'static str,
    },

    /// No usable trendlines
    #[error("Empty model: {reason}")]
    EmptyModel { reason: String },

    /// The negative name sampler ran out of attempts
    #[error("Sampling starvation: produced {produced} of {requested} negative trend names after {attempts} attempts")]
    SamplingStarvation {
        requested: usize,
        produced: usize,
        attempts: usize,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TwittpErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true, // I/O errors are often transient
            Self::MalformedRecord { .. }
            | Self::TimestampParse { .. }
            | Self::EmptyModel { .. }
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other { .. } => false,
            // A different seed may find enough names
            Self::SamplingStarvation { .. } => true,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedRecord { .. } | Self::TimestampParse { .. } => ErrorCategory::Input,
            Self::EmptyModel { .. } | Self::SamplingStarvation { .. } => ErrorCategory::Model,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a malformed record error
    pub fn malformed(
        source_name: impl Into<String>,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an empty model error
    pub fn empty_model(reason: impl Into<String>) -> Self {
        Self::EmptyModel {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
