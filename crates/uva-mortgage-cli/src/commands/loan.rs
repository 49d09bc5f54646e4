use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use uva_mortgage_core::format::parse_amount;
use uva_mortgage_core::mortgage::{
    LoanCalculator, LoanForm, LoanPurpose, LoanTerm, LocalizedLoan, ScheduleOptions,
};
use uva_mortgage_core::ComputationOutput;

use super::index::{resolve, today};
use super::parse_yes_no;
use crate::input;
use crate::settings::Settings;

/// Arguments for a mortgage quote
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON or YAML loan form (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Declared property value in ARS (es-AR notation accepted, e.g. 50.000.000)
    #[arg(long)]
    pub property_value: Option<String>,

    /// Requested loan amount in ARS (es-AR notation accepted)
    #[arg(long)]
    pub loan_amount: Option<String>,

    /// Term in years: 5, 10, 15, 20, 25 or 30
    #[arg(long)]
    pub term: Option<LoanTerm>,

    /// Loan purpose (primera-vivienda, segunda-vivienda, construccion, ampliacion)
    #[arg(long)]
    pub purpose: Option<LoanPurpose>,

    /// Salary deposited with the lender (yes/no)
    #[arg(long, value_parser = parse_yes_no, action = clap::ArgAction::Set)]
    pub payroll: Option<bool>,

    /// UVA value to use instead of resolving it from the feed
    #[arg(long)]
    pub index_value: Option<Decimal>,

    /// Read the UVA series from a local JSON file instead of the feed
    #[arg(long)]
    pub series: Option<String>,

    /// Include the first-year amortisation schedule
    #[arg(long)]
    pub schedule: bool,

    /// Include the schedule for the whole term
    #[arg(long)]
    pub full_schedule: bool,

    /// Render amounts in es-AR notation ($ 40.000.000, 132,41 UVA)
    #[arg(long)]
    pub localized: bool,
}

impl LoanArgs {
    fn has_form_flags(&self) -> bool {
        self.property_value.is_some()
            || self.loan_amount.is_some()
            || self.term.is_some()
            || self.purpose.is_some()
            || self.payroll.is_some()
    }

    fn form_from_flags(&self) -> Result<LoanForm, Box<dyn std::error::Error>> {
        let amount = |text: &Option<String>| -> Result<Option<Decimal>, Box<dyn std::error::Error>> {
            match text {
                Some(t) => Ok(parse_amount(t)?),
                None => Ok(None),
            }
        };

        Ok(LoanForm {
            property_value: amount(&self.property_value)?,
            loan_amount: amount(&self.loan_amount)?,
            term: self.term,
            purpose: self.purpose,
            payroll_with_lender: self.payroll,
            index_value: self.index_value,
        })
    }
}

pub fn run_loan(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let mut form: LoanForm = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.has_form_flags() {
        args.form_from_flags()?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("loan flags, --input <file> or a JSON form on stdin are required".into());
    };

    if args.index_value.is_some() {
        form.index_value = args.index_value;
    }

    let mut warnings = Vec::new();
    if form.index_value.is_none() {
        let resolution = resolve(settings, today(), args.series.as_deref())?;
        warnings.extend(resolution.warning());
        form.index_value = Some(resolution.value);
    }

    let mut calculator = LoanCalculator::new(ScheduleOptions {
        full_term: args.full_schedule,
    });
    if calculator.submit(&form)?.is_none() {
        return Err(format!(
            "missing required fields: {}",
            form.missing_fields().join(", ")
        )
        .into());
    }
    if args.schedule || args.full_schedule {
        calculator.toggle_schedule();
    }

    let mut output = calculator
        .presented()
        .ok_or("calculator produced no result")?;
    output.warnings.extend(warnings);
    info!(
        payment = %output.result.monthly_payment_indexed,
        rate = %output.result.annual_rate,
        "loan quoted"
    );

    if args.localized {
        let localized = ComputationOutput {
            result: LocalizedLoan::from(&output.result),
            methodology: output.methodology,
            assumptions: output.assumptions,
            warnings: output.warnings,
            metadata: output.metadata,
        };
        return Ok(serde_json::to_value(localized)?);
    }

    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reference_args() -> LoanArgs {
        LoanArgs {
            input: None,
            property_value: Some("50.000.000".into()),
            loan_amount: Some("$ 40.000.000".into()),
            term: Some(LoanTerm::Years30),
            purpose: Some(LoanPurpose::PrimaryResidence),
            payroll: Some(true),
            index_value: Some(Decimal::new(153069, 2)),
            series: None,
            schedule: false,
            full_schedule: false,
            localized: false,
        }
    }

    #[test]
    fn test_quote_without_schedule() {
        let value = run_loan(reference_args(), &Settings::default()).unwrap();
        assert_eq!(value["result"]["annual_rate"], "4.5");
        assert_eq!(value["result"]["total_payments"], 360);
        assert!(value["result"].get("schedule").is_none());
        assert_eq!(value["warnings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_quote_with_schedule() {
        let args = LoanArgs {
            schedule: true,
            ..reference_args()
        };
        let value = run_loan(args, &Settings::default()).unwrap();
        assert_eq!(value["result"]["schedule"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_full_schedule() {
        let args = LoanArgs {
            term: Some(LoanTerm::Years5),
            full_schedule: true,
            ..reference_args()
        };
        let value = run_loan(args, &Settings::default()).unwrap();
        assert_eq!(value["result"]["schedule"].as_array().unwrap().len(), 60);
    }

    #[test]
    fn test_localized_output() {
        let args = LoanArgs {
            localized: true,
            ..reference_args()
        };
        let value = run_loan(args, &Settings::default()).unwrap();
        assert_eq!(value["result"]["monthly_payment"]["indexed"], "132,41 UVA");
        assert_eq!(value["result"]["loan_amount"]["nominal"], "$ 40.000.000");
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let args = LoanArgs {
            purpose: None,
            payroll: None,
            ..reference_args()
        };
        let err = run_loan(args, &Settings::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: purpose, payroll_with_lender"
        );
    }

    #[test]
    fn test_fallback_index_value_when_feed_not_configured() {
        let args = LoanArgs {
            index_value: None,
            ..reference_args()
        };
        let value = run_loan(args, &Settings::default()).unwrap();
        assert_eq!(value["result"]["index_value"], "1530.69");
        let warnings = value["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].as_str().unwrap().contains("fallback"));
    }

    #[test]
    fn test_missing_series_file_is_reported() {
        let args = LoanArgs {
            index_value: None,
            series: Some("/definitely/not/here/uva.json".into()),
            ..reference_args()
        };
        let err = run_loan(args, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_out_of_range_amount_is_an_error() {
        let args = LoanArgs {
            loan_amount: Some("40.000.000.000.000.000.000.000.000.000".into()),
            payroll: Some(false),
            ..reference_args()
        };
        assert!(run_loan(args, &Settings::default()).is_err());
    }
}
