//! Input readers for tweet files, trend snapshot files and stopword lists

pub mod records;
pub mod snapshots;
pub mod stopwords;

pub use records::{
    parse_as_of, parse_created_at, JsonLines, MessageRecord, TrendEntry, TrendSnapshot,
    AS_OF_FORMAT, CREATED_AT_FORMAT,
};
pub use snapshots::{TrendIngestor, TwitterTrend};
pub use stopwords::{load_stopwords, parse_stopwords, Stopwords};
