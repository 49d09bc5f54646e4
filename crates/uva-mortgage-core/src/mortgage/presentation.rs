use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::amortization::{LoanCalculation, PaymentScheduleEntry};
use super::rate_policy::RateTier;
use crate::format::{format_ars, format_index_units, format_percent, LocalizedAmounts};

/// A [`LoanCalculation`] rendered for an es-AR reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedLoan {
    pub rate_tier: RateTier,
    pub annual_rate: String,
    pub index_value: String,
    pub total_payments: u32,
    pub loan_amount: LocalizedAmounts,
    pub monthly_payment: LocalizedAmounts,
    pub total_amount: LocalizedAmounts,
    pub total_interest: LocalizedAmounts,
    pub required_monthly_income: String,
    pub loan_to_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<LocalizedScheduleRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedScheduleRow {
    pub month: u32,
    pub interest: String,
    pub capital: String,
    pub payment: String,
    pub payment_ars: String,
    pub balance: String,
}

impl From<&PaymentScheduleEntry> for LocalizedScheduleRow {
    fn from(e: &PaymentScheduleEntry) -> Self {
        LocalizedScheduleRow {
            month: e.month,
            interest: format_index_units(e.interest_indexed),
            capital: format_index_units(e.capital_indexed),
            payment: format_index_units(e.total_indexed),
            payment_ars: format_ars(e.total_nominal),
            balance: format_index_units(e.remaining_balance_indexed),
        }
    }
}

impl From<&LoanCalculation> for LocalizedLoan {
    fn from(c: &LoanCalculation) -> Self {
        let iv = c.index_value;
        LocalizedLoan {
            rate_tier: c.rate_tier,
            annual_rate: format_percent(c.annual_rate),
            index_value: format_index_units(iv),
            total_payments: c.total_payments,
            loan_amount: LocalizedAmounts::new("Monto del préstamo", c.loan_amount_indexed, iv),
            monthly_payment: LocalizedAmounts::new("Cuota mensual", c.monthly_payment_indexed, iv),
            total_amount: LocalizedAmounts::new("Total a pagar", c.total_amount_indexed, iv),
            total_interest: LocalizedAmounts::new("Total de intereses", c.total_interest_indexed, iv),
            required_monthly_income: format_ars(c.required_monthly_income),
            loan_to_value: format_percent(c.loan_to_value * dec!(100)),
            schedule: c.schedule.iter().map(LocalizedScheduleRow::from).collect(),
        }
    }
}
