use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Loan term. Only the terms offered by the lender are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LoanTerm {
    Years5,
    Years10,
    Years15,
    Years20,
    Years25,
    Years30,
}

impl LoanTerm {
    pub const ALL: [LoanTerm; 6] = [
        LoanTerm::Years5,
        LoanTerm::Years10,
        LoanTerm::Years15,
        LoanTerm::Years20,
        LoanTerm::Years25,
        LoanTerm::Years30,
    ];

    pub fn years(self) -> u32 {
        match self {
            LoanTerm::Years5 => 5,
            LoanTerm::Years10 => 10,
            LoanTerm::Years15 => 15,
            LoanTerm::Years20 => 20,
            LoanTerm::Years25 => 25,
            LoanTerm::Years30 => 30,
        }
    }

    pub fn months(self) -> u32 {
        self.years() * 12
    }
}

impl TryFrom<u32> for LoanTerm {
    type Error = String;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        LoanTerm::ALL
            .into_iter()
            .find(|t| t.years() == years)
            .ok_or_else(|| format!("term must be one of 5, 10, 15, 20, 25 or 30 years (got {years})"))
    }
}

impl From<LoanTerm> for u32 {
    fn from(term: LoanTerm) -> u32 {
        term.years()
    }
}

impl FromStr for LoanTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a number of years"))?;
        LoanTerm::try_from(years)
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years", self.years())
    }
}

/// What the financed property will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    #[serde(alias = "primera_vivienda")]
    PrimaryResidence,
    #[serde(alias = "segunda_vivienda")]
    SecondaryResidence,
    #[serde(alias = "construccion")]
    Construction,
    #[serde(alias = "ampliacion")]
    Expansion,
}

impl FromStr for LoanPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "primary_residence" | "primera_vivienda" => Ok(LoanPurpose::PrimaryResidence),
            "secondary_residence" | "segunda_vivienda" => Ok(LoanPurpose::SecondaryResidence),
            "construction" | "construccion" | "construcción" => Ok(LoanPurpose::Construction),
            "expansion" | "ampliacion" | "ampliación" => Ok(LoanPurpose::Expansion),
            other => Err(format!(
                "unknown purpose '{other}' (expected primera-vivienda, segunda-vivienda, construccion or ampliacion)"
            )),
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoanPurpose::PrimaryResidence => "primary residence",
            LoanPurpose::SecondaryResidence => "secondary residence",
            LoanPurpose::Construction => "construction",
            LoanPurpose::Expansion => "expansion",
        };
        f.write_str(label)
    }
}

/// A complete loan request, ready to be priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Declared value of the property being financed (ARS).
    pub property_value: Money,
    /// Requested principal (ARS).
    pub loan_amount: Money,
    pub term: LoanTerm,
    pub purpose: LoanPurpose,
    /// Salary deposited with the lending institution.
    pub payroll_with_lender: bool,
    /// UVA value used to convert between ARS and index units.
    pub index_value: Decimal,
}

/// Raw, possibly incomplete form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanForm {
    pub property_value: Option<Money>,
    pub loan_amount: Option<Money>,
    pub term: Option<LoanTerm>,
    pub purpose: Option<LoanPurpose>,
    pub payroll_with_lender: Option<bool>,
    pub index_value: Option<Decimal>,
}

impl LoanForm {
    /// Names of required fields that are absent or zero.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn blank(v: Option<Decimal>) -> bool {
            v.map_or(true, |d| d.is_zero())
        }

        let mut missing = Vec::new();
        if blank(self.property_value) {
            missing.push("property_value");
        }
        if blank(self.loan_amount) {
            missing.push("loan_amount");
        }
        if self.term.is_none() {
            missing.push("term");
        }
        if self.purpose.is_none() {
            missing.push("purpose");
        }
        if self.payroll_with_lender.is_none() {
            missing.push("payroll_with_lender");
        }
        if blank(self.index_value) {
            missing.push("index_value");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The quote this form describes, or `None` until every field is filled in.
    pub fn to_quote(&self) -> Option<LoanQuote> {
        if !self.is_complete() {
            return None;
        }
        Some(LoanQuote {
            property_value: self.property_value?,
            loan_amount: self.loan_amount?,
            term: self.term?,
            purpose: self.purpose?,
            payroll_with_lender: self.payroll_with_lender?,
            index_value: self.index_value?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn complete_form() -> LoanForm {
        LoanForm {
            property_value: Some(dec!(50_000_000)),
            loan_amount: Some(dec!(40_000_000)),
            term: Some(LoanTerm::Years30),
            purpose: Some(LoanPurpose::PrimaryResidence),
            payroll_with_lender: Some(true),
            index_value: Some(dec!(1530.69)),
        }
    }

    #[test]
    fn test_term_accepts_only_offered_years() {
        for years in [5, 10, 15, 20, 25, 30] {
            assert_eq!(LoanTerm::try_from(years).unwrap().years(), years);
        }
        for years in [0, 1, 12, 35, 40] {
            assert!(LoanTerm::try_from(years).is_err(), "{years} should be rejected");
        }
        assert_eq!(LoanTerm::Years30.months(), 360);
    }

    #[test]
    fn test_term_deserializes_from_number() {
        let term: LoanTerm = serde_json::from_str("20").unwrap();
        assert_eq!(term, LoanTerm::Years20);
        assert!(serde_json::from_str::<LoanTerm>("7").is_err());
        assert_eq!(serde_json::to_string(&LoanTerm::Years15).unwrap(), "15");
    }

    #[test]
    fn test_purpose_accepts_spanish_names() {
        let p: LoanPurpose = serde_json::from_str("\"primera_vivienda\"").unwrap();
        assert_eq!(p, LoanPurpose::PrimaryResidence);
        assert_eq!("segunda-vivienda".parse::<LoanPurpose>().unwrap(), LoanPurpose::SecondaryResidence);
        assert_eq!("Construccion".parse::<LoanPurpose>().unwrap(), LoanPurpose::Construction);
        assert_eq!("expansion".parse::<LoanPurpose>().unwrap(), LoanPurpose::Expansion);
        assert!("vacation_home".parse::<LoanPurpose>().is_err());
    }

    #[test]
    fn test_complete_form_builds_quote() {
        let quote = complete_form().to_quote().unwrap();
        assert_eq!(quote.term, LoanTerm::Years30);
        assert_eq!(quote.index_value, dec!(1530.69));
    }

    #[test]
    fn test_payroll_false_counts_as_answered() {
        let form = LoanForm {
            payroll_with_lender: Some(false),
            ..complete_form()
        };
        assert!(form.to_quote().is_some());
    }

    #[test]
    fn test_incomplete_form_is_gated() {
        let form = LoanForm {
            index_value: Some(Decimal::ZERO),
            loan_amount: None,
            ..complete_form()
        };
        assert_eq!(form.missing_fields(), vec!["loan_amount", "index_value"]);
        assert!(form.to_quote().is_none());
        assert_eq!(LoanForm::default().missing_fields().len(), 6);
    }

    #[test]
    fn test_form_deserializes_partial_json() {
        let form: LoanForm =
            serde_json::from_str(r#"{"loan_amount": "40000000", "term": 30}"#).unwrap();
        assert_eq!(form.loan_amount, Some(dec!(40000000)));
        assert_eq!(form.term, Some(LoanTerm::Years30));
        assert!(form.purpose.is_none());
    }
}
