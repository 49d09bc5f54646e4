use std::str::FromStr;

use chrono::Local;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use uva_mortgage_core::format;
use uva_mortgage_core::index::{
    parse_feed_date, resolve_index_value, IndexSeries, FALLBACK_INDEX_VALUE,
};
use uva_mortgage_core::mortgage::{
    calculate_mortgage as price_quote, LoanForm, LoanPurpose, LocalizedLoan, RateTier,
    ScheduleOptions,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, text: &str) -> NapiResult<Decimal> {
    Decimal::from_str(text.trim())
        .map_err(|e| to_napi_error(format!("{field}: '{text}' is not a decimal ({e})")))
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct MortgageRequest {
    #[serde(flatten)]
    form: LoanForm,
    #[serde(default)]
    full_term: bool,
    #[serde(default)]
    localized: bool,
}

/// Price a loan form. Returns `"null"` while the form is incomplete.
#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let request: MortgageRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let Some(quote) = request.form.to_quote() else {
        return Ok("null".to_string());
    };
    let options = ScheduleOptions {
        full_term: request.full_term,
    };
    let output = price_quote(&quote, &options).map_err(to_napi_error)?;

    if request.localized {
        return serde_json::to_string(&LocalizedLoan::from(&output.result)).map_err(to_napi_error);
    }
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn select_rate(purpose: String, payroll_with_lender: bool) -> NapiResult<String> {
    let purpose = LoanPurpose::from_str(&purpose).map_err(to_napi_error)?;
    let tier = RateTier::for_borrower(purpose, payroll_with_lender);
    Ok(tier.annual_rate().to_string())
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Resolve the index value from a feed payload the caller already fetched.
/// `date` is DD-MM-YYYY and defaults to today; a payload that cannot be parsed
/// resolves to the fallback value.
#[napi]
pub fn resolve_index(series_json: String, date: Option<String>) -> NapiResult<String> {
    let day = match date {
        Some(d) => parse_feed_date(&d).map_err(to_napi_error)?,
        None => Local::now().date_naive(),
    };
    let resolution = resolve_index_value(IndexSeries::parse(&series_json), day, FALLBACK_INDEX_VALUE);
    serde_json::to_string(&resolution).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_ars(amount: String) -> NapiResult<String> {
    Ok(format::format_ars(parse_decimal("amount", &amount)?))
}

#[napi]
pub fn format_index_units(amount: String) -> NapiResult<String> {
    Ok(format::format_index_units(parse_decimal("amount", &amount)?))
}

/// Parse a free-text es-AR amount; `null` for blank input.
#[napi]
pub fn parse_amount(text: String) -> NapiResult<Option<String>> {
    let parsed = format::parse_amount(&text).map_err(to_napi_error)?;
    Ok(parsed.map(|d| d.to_string()))
}
