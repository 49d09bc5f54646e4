use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::series::{IndexSeries, FEED_DATE_FORMAT};
use super::FeedError;

/// Index value used when the feed cannot be read or is empty.
pub const FALLBACK_INDEX_VALUE: Decimal = dec!(1530.69);

/// Where a resolved index value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexSource {
    /// Published in the feed. `exact` is false when today's row was missing
    /// and the most recent one was used instead.
    Feed { date: String, exact: bool },
    Fallback { reason: String },
}

/// A usable index value and its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResolution {
    pub value: Decimal,
    pub requested_date: String,
    pub source: IndexSource,
}

impl IndexResolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, IndexSource::Fallback { .. })
    }

    /// Message worth surfacing next to a computation, if any.
    pub fn warning(&self) -> Option<String> {
        match &self.source {
            IndexSource::Feed { exact: true, .. } => None,
            IndexSource::Feed { date, exact: false } => Some(format!(
                "No index value published for {}; using the value of {}",
                self.requested_date, date
            )),
            IndexSource::Fallback { reason } => Some(format!(
                "Index feed unavailable ({reason}); using fallback value {}",
                self.value
            )),
        }
    }
}

/// Turn a feed outcome into a usable value for `today`.
///
/// Never fails: any feed error, or a series without usable entries, resolves
/// to `fallback`.
pub fn resolve_index_value(
    feed: Result<IndexSeries, FeedError>,
    today: NaiveDate,
    fallback: Decimal,
) -> IndexResolution {
    let requested_date = today.format(FEED_DATE_FORMAT).to_string();

    let lookup = feed.and_then(|series| series.value_on(today));

    match lookup {
        Ok(found) => {
            let date = found.entry.date.format(FEED_DATE_FORMAT).to_string();
            if found.exact {
                info!(date = %date, value = %found.entry.value, "index value resolved");
            } else {
                warn!(requested = %requested_date, used = %date, "no index value for today, using latest");
            }
            IndexResolution {
                value: found.entry.value,
                requested_date,
                source: IndexSource::Feed {
                    date,
                    exact: found.exact,
                },
            }
        }
        Err(e) => {
            warn!(error = %e, fallback = %fallback, "index feed unavailable, using fallback value");
            IndexResolution {
                value: fallback,
                requested_date,
                source: IndexSource::Fallback {
                    reason: e.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::series::IndexEntry;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn series() -> IndexSeries {
        IndexSeries::from_entries(vec![
            IndexEntry {
                date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
                value: dec!(1529.40),
            },
            IndexEntry {
                date: today(),
                value: dec!(1530.12),
            },
        ])
    }

    #[test]
    fn test_resolves_todays_value() {
        let res = resolve_index_value(Ok(series()), today(), FALLBACK_INDEX_VALUE);
        assert_eq!(res.value, dec!(1530.12));
        assert_eq!(res.requested_date, "19-10-2026");
        assert_eq!(
            res.source,
            IndexSource::Feed {
                date: "19-10-2026".into(),
                exact: true
            }
        );
        assert!(res.warning().is_none());
    }

    #[test]
    fn test_stale_series_uses_latest_with_warning() {
        let tomorrow = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let res = resolve_index_value(Ok(series()), tomorrow, FALLBACK_INDEX_VALUE);
        assert_eq!(res.value, dec!(1530.12));
        assert!(!res.is_fallback());
        assert!(res.warning().unwrap().contains("19-10-2026"));
    }

    #[test]
    fn test_transport_error_uses_fallback() {
        let res = resolve_index_value(
            Err(FeedError::Transport("connection refused".into())),
            today(),
            FALLBACK_INDEX_VALUE,
        );
        assert_eq!(res.value, FALLBACK_INDEX_VALUE);
        assert!(res.is_fallback());
        assert!(res.warning().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_empty_series_uses_fallback() {
        let res = resolve_index_value(Ok(IndexSeries::default()), today(), dec!(1000));
        assert_eq!(res.value, dec!(1000));
        assert_eq!(
            res.source,
            IndexSource::Fallback {
                reason: FeedError::Empty.to_string()
            }
        );
    }
}
