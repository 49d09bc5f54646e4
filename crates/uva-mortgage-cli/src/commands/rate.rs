use clap::Args;
use serde_json::{json, Value};

use uva_mortgage_core::mortgage::{LoanPurpose, RateTier};

use super::parse_yes_no;

/// Arguments for the rate lookup
#[derive(Args)]
pub struct RateArgs {
    /// Loan purpose (primera-vivienda, segunda-vivienda, construccion, ampliacion)
    #[arg(long)]
    pub purpose: LoanPurpose,

    /// Salary deposited with the lender (yes/no)
    #[arg(long, value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub payroll: bool,
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tier = RateTier::for_borrower(args.purpose, args.payroll);
    Ok(json!({
        "result": {
            "purpose": args.purpose,
            "payroll_with_lender": args.payroll,
            "rate_tier": tier,
            "annual_rate": tier.annual_rate(),
        }
    }))
}
