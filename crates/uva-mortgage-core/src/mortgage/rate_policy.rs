use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::quote::LoanPurpose;
use crate::types::Percent;

/// Annual rate for first homes bought by borrowers paid through the lender.
pub const PREFERENTIAL_ANNUAL_RATE: Percent = dec!(4.5);

/// Annual rate for every other loan.
pub const STANDARD_ANNUAL_RATE: Percent = dec!(8.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    Preferential,
    Standard,
}

impl RateTier {
    pub fn for_borrower(purpose: LoanPurpose, payroll_with_lender: bool) -> Self {
        if purpose == LoanPurpose::PrimaryResidence && payroll_with_lender {
            RateTier::Preferential
        } else {
            RateTier::Standard
        }
    }

    pub fn annual_rate(self) -> Percent {
        match self {
            RateTier::Preferential => PREFERENTIAL_ANNUAL_RATE,
            RateTier::Standard => STANDARD_ANNUAL_RATE,
        }
    }
}

/// Nominal annual rate, as a percentage, offered for this borrower profile.
pub fn select_annual_rate(purpose: LoanPurpose, payroll_with_lender: bool) -> Decimal {
    RateTier::for_borrower(purpose, payroll_with_lender).annual_rate()
}
