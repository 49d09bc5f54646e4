use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;
use tracing::info;

use uva_mortgage_core::index::{
    self, fetch_index_series, resolve_index_value, FeedError, IndexResolution, IndexSeries,
};

use crate::input;
use crate::settings::Settings;

/// Arguments for index value resolution
#[derive(Args)]
pub struct IndexArgs {
    /// Date to resolve (DD-MM-YYYY). Defaults to today in local time.
    #[arg(long, value_parser = parse_feed_date)]
    pub date: Option<NaiveDate>,

    /// Read the series from a local JSON file instead of the feed
    #[arg(long)]
    pub series: Option<String>,
}

pub fn parse_feed_date(s: &str) -> Result<NaiveDate, String> {
    index::parse_feed_date(s).map_err(|e| format!("'{s}' is not a DD-MM-YYYY date ({e})"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Load the series from `series_path` if given, else from the configured feed.
///
/// An unreadable local file is the caller's mistake and is returned as an
/// error; only feed problems are left for the resolver to fall back on.
pub fn load_series(
    settings: &Settings,
    series_path: Option<&str>,
) -> Result<Result<IndexSeries, FeedError>, Box<dyn std::error::Error>> {
    if let Some(path) = series_path {
        info!(path, "reading index series from file");
        let text = input::file::read_text(path)?;
        return Ok(IndexSeries::parse(&text));
    }

    Ok(match settings.feed_config() {
        Some(config) => fetch_index_series(&config),
        None => Err(FeedError::NotConfigured),
    })
}

/// Resolve the index value for `date`, falling back to the configured constant.
pub fn resolve(
    settings: &Settings,
    date: NaiveDate,
    series_path: Option<&str>,
) -> Result<IndexResolution, Box<dyn std::error::Error>> {
    let series = load_series(settings, series_path)?;
    Ok(resolve_index_value(series, date, settings.fallback_index_value))
}

pub fn run_index(args: IndexArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let date = args.date.unwrap_or_else(today);
    let resolution = resolve(settings, date, args.series.as_deref())?;
    let warnings: Vec<String> = resolution.warning().into_iter().collect();

    Ok(serde_json::json!({
        "result": resolution,
        "warnings": warnings,
    }))
}
