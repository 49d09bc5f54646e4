use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Percent, Rate};
use crate::MortgageResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage (4.5) into a monthly decimal rate (0.00375).
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / dec!(100) / MONTHS_PER_YEAR
}

/// Level payment that amortises `principal` over `nper` periods (French system).
///
/// Returned with a positive sign, in the same unit as `principal`. A zero rate
/// degenerates to straight-line repayment.
pub fn annuity_payment(principal: Decimal, rate: Rate, nper: u32) -> MortgageResult<Decimal> {
    if nper == 0 {
        return Err(MortgageError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "nper".into(),
            reason: format!("Compounding factor overflows for {nper} periods"),
        })?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Payment is outside the representable decimal range".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_eq!(monthly_rate(dec!(4.5)), dec!(0.00375));
        assert!((monthly_rate(dec!(8.0)) - dec!(0.0066666667)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_annuity_payment_basic() {
        // 1200 over 12 months at 8% p.a. is about 104.39 a month
        let result = annuity_payment(dec!(1200), monthly_rate(dec!(8)), 12).unwrap();
        assert!((result - dec!(104.3861)).abs() < dec!(0.001));
    }

    #[test]
    fn test_annuity_payment_zero_rate_is_straight_line() {
        let result = annuity_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(result, dec!(100));
    }

    #[test]
    fn test_annuity_payment_rejects_zero_periods() {
        assert!(annuity_payment(dec!(1200), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_annuity_payment_rejects_negative_rate() {
        assert!(annuity_payment(dec!(1200), dec!(-0.01), 12).is_err());
    }

    #[test]
    fn test_annuity_payment_overflow_is_an_error() {
        let err = annuity_payment(Decimal::MAX, dec!(0.5), 360).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { .. }));
    }
}
