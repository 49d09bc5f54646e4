//! French (annuity) amortisation of UVA-denominated mortgages.
//!
//! The principal is converted into index units once, the level payment and
//! the month-by-month ledger are computed entirely in UVA, and nominal (ARS)
//! figures are derived at the end by multiplying by the index value. All math
//! in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::quote::LoanQuote;
use super::rate_policy::RateTier;
use crate::error::MortgageError;
use crate::time_value::{annuity_payment, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, IndexUnits, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Months of schedule shown by default.
pub const DISPLAY_MONTHS: u32 = 12;

/// Lenders require income of at least this multiple of the monthly payment.
pub const INCOME_TO_PAYMENT_MULTIPLE: Decimal = dec!(4);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Build the ledger for every month of the term instead of the first year.
    #[serde(default)]
    pub full_term: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// 1-based month number.
    pub month: u32,
    pub interest_indexed: IndexUnits,
    pub capital_indexed: IndexUnits,
    pub total_indexed: IndexUnits,
    pub total_nominal: Money,
    /// Balance after this month's capital is repaid.
    pub remaining_balance_indexed: IndexUnits,
    pub remaining_balance_nominal: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub rate_tier: RateTier,
    /// Nominal annual rate in percent (4.5 = 4.5%).
    pub annual_rate: Percent,
    pub monthly_rate: Rate,
    pub index_value: Decimal,
    pub loan_amount_indexed: IndexUnits,
    pub monthly_payment_indexed: IndexUnits,
    pub monthly_payment_nominal: Money,
    pub total_payments: u32,
    pub total_amount_indexed: IndexUnits,
    pub total_amount_nominal: Money,
    pub total_interest_indexed: IndexUnits,
    pub total_interest_nominal: Money,
    pub required_monthly_income: Money,
    pub loan_to_value: Rate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<PaymentScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a quote and wrap the result in the standard output envelope.
pub fn calculate_mortgage(
    quote: &LoanQuote,
    options: &ScheduleOptions,
) -> MortgageResult<ComputationOutput<LoanCalculation>> {
    let start = Instant::now();

    let calculation = compute_loan(quote, options)?;

    let mut warnings = Vec::new();
    if quote.loan_amount > quote.property_value {
        warnings.push(format!(
            "Loan amount exceeds the property value (LTV {}%)",
            (calculation.loan_to_value * dec!(100)).round_dp(1)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "French amortisation in UVA",
        quote,
        warnings,
        elapsed,
        calculation,
    ))
}

/// Compute the level payment, totals and ledger for a quote.
pub fn compute_loan(
    quote: &LoanQuote,
    options: &ScheduleOptions,
) -> MortgageResult<LoanCalculation> {
    validate_quote(quote)?;

    let tier = RateTier::for_borrower(quote.purpose, quote.payroll_with_lender);
    let annual_rate = tier.annual_rate();
    let rate = monthly_rate(annual_rate);
    let term_months = quote.term.months();
    let index_value = quote.index_value;

    let principal = checked(quote.loan_amount.checked_div(index_value), "loan_amount")?;
    let payment = annuity_payment(principal, rate, term_months)?;

    let shown = if options.full_term {
        term_months
    } else {
        term_months.min(DISPLAY_MONTHS)
    };
    let schedule = build_schedule(principal, payment, rate, shown, index_value)?;

    let total_amount_indexed = checked(
        payment.checked_mul(Decimal::from(term_months)),
        "total_amount_indexed",
    )?;
    let total_interest_indexed = total_amount_indexed - principal;
    let monthly_payment_nominal = nominal(payment, index_value, "monthly_payment_nominal")?;
    let loan_to_value = checked(
        quote.loan_amount.checked_div(quote.property_value),
        "property_value",
    )?;
    // the localized view renders these products again
    nominal(principal, index_value, "loan_amount")?;
    checked(loan_to_value.checked_mul(dec!(100)), "property_value")?;

    Ok(LoanCalculation {
        rate_tier: tier,
        annual_rate,
        monthly_rate: rate,
        index_value,
        loan_amount_indexed: principal,
        monthly_payment_indexed: payment,
        monthly_payment_nominal,
        total_payments: term_months,
        total_amount_indexed,
        total_amount_nominal: nominal(total_amount_indexed, index_value, "total_amount_nominal")?,
        total_interest_indexed,
        total_interest_nominal: nominal(
            total_interest_indexed,
            index_value,
            "total_interest_nominal",
        )?,
        required_monthly_income: checked(
            monthly_payment_nominal.checked_mul(INCOME_TO_PAYMENT_MULTIPLE),
            "required_monthly_income",
        )?,
        loan_to_value,
        schedule,
    })
}

fn checked(value: Option<Decimal>, field: &str) -> MortgageResult<Decimal> {
    value.ok_or_else(|| MortgageError::InvalidInput {
        field: field.into(),
        reason: "Amount is outside the representable decimal range".into(),
    })
}

fn nominal(indexed: IndexUnits, index_value: Decimal, field: &str) -> MortgageResult<Money> {
    checked(indexed.checked_mul(index_value), field)
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The balance is carried from month to month, never recomputed in closed form.
fn build_schedule(
    principal: IndexUnits,
    payment: IndexUnits,
    rate: Rate,
    months: u32,
    index_value: Decimal,
) -> MortgageResult<Vec<PaymentScheduleEntry>> {
    let mut balance = principal;
    let mut schedule = Vec::with_capacity(months as usize);
    let payment_nominal = nominal(payment, index_value, "monthly_payment_nominal")?;

    for month in 1..=months {
        let interest = checked(balance.checked_mul(rate), "loan_amount")?;
        let capital = payment - interest;
        balance -= capital;

        schedule.push(PaymentScheduleEntry {
            month,
            interest_indexed: interest,
            capital_indexed: capital,
            total_indexed: payment,
            total_nominal: payment_nominal,
            remaining_balance_indexed: balance,
            remaining_balance_nominal: nominal(balance, index_value, "remaining_balance_nominal")?,
        });
    }

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_quote(quote: &LoanQuote) -> MortgageResult<()> {
    if quote.index_value <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "index_value".into(),
            reason: "Index value must be positive".into(),
        });
    }
    if quote.loan_amount <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if quote.property_value <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_value".into(),
            reason: "Property value must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
