//! Blocking HTTP client for the published index series.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::series::{IndexSeries, RawEntry};
use super::FeedError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to fetch the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl FeedConfig {
    pub fn new(url: impl Into<String>) -> Self {
        FeedConfig {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Fetch the whole series with a single GET. No retry and no caching.
pub fn fetch_index_series(config: &FeedConfig) -> Result<IndexSeries, FeedError> {
    debug!(url = %config.url, "fetching index series");

    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build();

    let response = agent
        .get(&config.url)
        .set("Accept", "application/json")
        .call()
        .map_err(|e| FeedError::Transport(e.to_string()))?;

    let raw: Vec<RawEntry> = response
        .into_json()
        .map_err(|e| FeedError::Malformed(e.to_string()))?;

    Ok(IndexSeries::from_raw(raw))
}
