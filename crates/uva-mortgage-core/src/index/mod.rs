//! Daily UVA index value: feed series, date lookup and caller-side fallback.

pub mod resolver;
pub mod series;

#[cfg(feature = "feed")]
pub mod feed;

use thiserror::Error;

pub use resolver::{resolve_index_value, IndexResolution, IndexSource, FALLBACK_INDEX_VALUE};
pub use series::{parse_feed_date, IndexEntry, IndexLookup, IndexSeries, FEED_DATE_FORMAT};

#[cfg(feature = "feed")]
pub use feed::{fetch_index_series, FeedConfig, DEFAULT_TIMEOUT_SECS};

/// Why the index feed could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("series contains no usable entries")]
    Empty,

    #[error("no feed URL configured")]
    NotConfigured,
}
