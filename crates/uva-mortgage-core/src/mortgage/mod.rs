//! UVA-indexed mortgage quotes: rate policy, French amortisation and the
//! calculator session that drives them.

pub mod amortization;
pub mod calculator;
pub mod presentation;
pub mod quote;
pub mod rate_policy;

pub use amortization::{
    calculate_mortgage, compute_loan, LoanCalculation, PaymentScheduleEntry, ScheduleOptions,
};
pub use calculator::{CalculatorState, LoanCalculator};
pub use presentation::{LocalizedLoan, LocalizedScheduleRow};
pub use quote::{LoanForm, LoanPurpose, LoanQuote, LoanTerm};
pub use rate_policy::{select_annual_rate, RateTier};
