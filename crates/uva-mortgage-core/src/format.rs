//! es-AR presentation helpers.
//!
//! Currency is rendered the way the browser `Intl` API renders ARS for the
//! `es-AR` locale (`$ 40.000.000`, no decimals), index-unit quantities with two
//! decimals and a comma decimal separator (`132,41`). Free-text amounts typed
//! in that same locale are parsed back with [`parse_amount`].

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{IndexUnits, Money};
use crate::MortgageResult;

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const CURRENCY_SYMBOL: &str = "$";

/// Format a nominal amount as es-AR pesos with no decimals.
pub fn format_ars(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}{CURRENCY_SYMBOL} {}", group_thousands(&digits))
}

/// Format an index-unit quantity with two decimals (`26.132,01`).
pub fn format_index_units(amount: IndexUnits) -> String {
    format_decimal(amount, 2)
}

/// Format a percentage with up to two decimals (`4,5 %`).
pub fn format_percent(pct: Decimal) -> String {
    let rounded = pct
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{} %", rounded.to_string().replace('.', ","))
}

fn format_decimal(amount: Decimal, dp: u32) -> String {
    let mut rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(&frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Parse a free-text amount typed in es-AR notation.
///
/// Strips the currency symbol, whitespace and `.` thousands separators; a
/// single `,` is taken as the decimal separator. Blank input is `None`.
pub fn parse_amount(text: &str) -> MortgageResult<Option<Decimal>> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != THOUSANDS_SEPARATOR && *c != '$')
        .collect();

    if cleaned.is_empty() {
        return Ok(None);
    }

    if cleaned.matches(DECIMAL_SEPARATOR).count() > 1 {
        return Err(MortgageError::InvalidInput {
            field: "amount".into(),
            reason: format!("'{text}' has more than one decimal separator"),
        });
    }

    let normalized = cleaned.replace(DECIMAL_SEPARATOR, ".");
    Decimal::from_str(&normalized)
        .map(Some)
        .map_err(|_| MortgageError::InvalidInput {
            field: "amount".into(),
            reason: format!("'{text}' is not a valid amount"),
        })
}

/// Human-readable rendering of a loan result, every field already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedAmounts {
    pub label: String,
    pub indexed: String,
    pub nominal: String,
}

impl LocalizedAmounts {
    pub fn new(label: &str, indexed: IndexUnits, index_value: Decimal) -> Self {
        LocalizedAmounts {
            label: label.to_string(),
            indexed: format!("{} UVA", format_index_units(indexed)),
            nominal: format_ars(indexed * index_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_ars_groups_thousands() {
        assert_eq!(format_ars(dec!(40000000)), "$ 40.000.000");
        assert_eq!(format_ars(dec!(999)), "$ 999");
        assert_eq!(format_ars(dec!(1000)), "$ 1.000");
        assert_eq!(format_ars(dec!(0)), "$ 0");
    }

    #[test]
    fn test_format_ars_rounds_half_away_from_zero() {
        assert_eq!(format_ars(dec!(202674.5)), "$ 202.675");
        assert_eq!(format_ars(dec!(202674.12393)), "$ 202.674");
        assert_eq!(format_ars(dec!(-1500.5)), "-$ 1.501");
    }

    #[test]
    fn test_format_index_units_two_decimals() {
        assert_eq!(format_index_units(dec!(132.40703469)), "132,41");
        assert_eq!(format_index_units(dec!(26132.00582)), "26.132,01");
        assert_eq!(format_index_units(dec!(5)), "5,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(4.5)), "4,5 %");
        assert_eq!(format_percent(dec!(8.0)), "8 %");
    }

    #[test]
    fn test_parse_amount_strips_separators() {
        assert_eq!(parse_amount("50.000.000").unwrap(), Some(dec!(50000000)));
        assert_eq!(parse_amount("$ 40.000.000").unwrap(), Some(dec!(40000000)));
        assert_eq!(parse_amount("1.234,56").unwrap(), Some(dec!(1234.56)));
        assert_eq!(parse_amount("  ").unwrap(), None);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1,2,3").is_err());
    }

    #[test]
    fn test_localized_amounts() {
        let amounts = LocalizedAmounts::new("Cuota", dec!(100), dec!(1530.69));
        assert_eq!(amounts.indexed, "100,00 UVA");
        assert_eq!(amounts.nominal, "$ 153.069");
    }
}
