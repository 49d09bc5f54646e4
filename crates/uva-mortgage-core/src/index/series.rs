use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::FeedError;
use crate::MortgageResult;

/// Date format used by the feed (`DD-MM-YYYY`).
pub const FEED_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a `DD-MM-YYYY` date as written by the feed.
pub fn parse_feed_date(text: &str) -> MortgageResult<NaiveDate> {
    Ok(NaiveDate::parse_from_str(text.trim(), FEED_DATE_FORMAT)?)
}

/// One element of the feed payload, exactly as published.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntry {
    fecha: String,
    valor: f64,
}

/// A single dated index value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Entry selected for a given date, and whether the date matched exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLookup {
    pub entry: IndexEntry,
    pub exact: bool,
}

/// Time series of published index values, kept in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSeries {
    entries: Vec<IndexEntry>,
    skipped: usize,
}

impl IndexSeries {
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        IndexSeries {
            entries,
            skipped: 0,
        }
    }

    /// Parse a feed payload: a JSON array of `{fecha, valor}` objects.
    pub fn parse(json: &str) -> Result<Self, FeedError> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|e| FeedError::Malformed(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Entries with an unparsable date or a non-positive value are dropped.
    pub(crate) fn from_raw(raw: Vec<RawEntry>) -> Self {
        let total = raw.len();
        let mut entries = Vec::with_capacity(total);

        for item in raw {
            let date = match parse_feed_date(&item.fecha) {
                Ok(d) => d,
                Err(e) => {
                    warn!(fecha = %item.fecha, error = %e, "skipping index entry with bad date");
                    continue;
                }
            };
            let value = match Decimal::from_str(&item.valor.to_string()) {
                Ok(v) if v > Decimal::ZERO => v,
                _ => {
                    warn!(fecha = %item.fecha, valor = item.valor, "skipping index entry with bad value");
                    continue;
                }
            };
            entries.push(IndexEntry { date, value });
        }

        let skipped = total - entries.len();
        debug!(entries = entries.len(), skipped, "parsed index series");
        IndexSeries { entries, skipped }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of feed rows dropped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn exact(&self, date: NaiveDate) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Most recent entry by date. On equal dates the later one in feed order wins.
    pub fn latest(&self) -> Option<&IndexEntry> {
        self.entries.iter().max_by_key(|e| e.date)
    }

    /// Value published for `date`, or the most recent one if that day is absent.
    pub fn value_on(&self, date: NaiveDate) -> Result<IndexLookup, FeedError> {
        if let Some(entry) = self.exact(date) {
            return Ok(IndexLookup {
                entry: entry.clone(),
                exact: true,
            });
        }

        self.latest()
            .map(|entry| IndexLookup {
                entry: entry.clone(),
                exact: false,
            })
            .ok_or(FeedError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const PAYLOAD: &str = r#"[
        {"fecha": "17-10-2026", "valor": 1528.11},
        {"fecha": "19-10-2026", "valor": 1530.69},
        {"fecha": "18-10-2026", "valor": 1529.40}
    ]"#;

    #[test]
    fn test_parse_feed_date() {
        assert_eq!(parse_feed_date(" 19-10-2026 ").unwrap(), day(19, 10, 2026));
        let err = parse_feed_date("2026-10-19").unwrap_err();
        assert!(matches!(err, crate::MortgageError::DateError(_)));
    }

    #[test]
    fn test_parse_feed_payload() {
        let series = IndexSeries::parse(PAYLOAD).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.skipped(), 0);
        assert_eq!(series.entries()[0].date, day(17, 10, 2026));
        assert_eq!(series.entries()[0].value, dec!(1528.11));
    }

    #[test]
    fn test_exact_date_match() {
        let series = IndexSeries::parse(PAYLOAD).unwrap();
        let lookup = series.value_on(day(18, 10, 2026)).unwrap();
        assert!(lookup.exact);
        assert_eq!(lookup.entry.value, dec!(1529.40));
    }

    #[test]
    fn test_missing_date_falls_back_to_latest_by_date_not_array_order() {
        let series = IndexSeries::parse(PAYLOAD).unwrap();
        let lookup = series.value_on(day(20, 10, 2026)).unwrap();
        assert!(!lookup.exact);
        // last element in the array is the 18th; the newest date is the 19th
        assert_eq!(lookup.entry.date, day(19, 10, 2026));
        assert_eq!(lookup.entry.value, dec!(1530.69));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let payload = r#"[
            {"fecha": "2026-10-19", "valor": 1.0},
            {"fecha": "19-10-2026", "valor": 0},
            {"fecha": "18-10-2026", "valor": 1529.4}
        ]"#;
        let series = IndexSeries::parse(payload).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.skipped(), 2);
    }

    #[test]
    fn test_malformed_payload() {
        let err = IndexSeries::parse(r#"{"fecha": "19-10-2026"}"#).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }

    #[test]
    fn test_empty_series() {
        let series = IndexSeries::parse("[]").unwrap();
        assert_eq!(series.value_on(day(19, 10, 2026)), Err(FeedError::Empty));
    }
}
