//! Model construction stages
//!
//! - [`runs`] - positive trend lines from ingested trending windows
//! - [`word_model`] - word frequency model of the message corpus
//! - [`negative`] - synthetic negative trend lines
//! - [`features`] - count, delta and delta-delta population

pub mod features;
pub mod negative;
pub mod runs;
pub mod word_model;

pub use features::{
    compute_deltas, populate_counts, populate_features, populate_from_file, PopulationStats,
};
pub use negative::{NegativeSynthesizer, SpanBounds};
pub use runs::{longest_run, Run, RunExtractor};
pub use word_model::{WordFrequencyModel, WordSampler};
