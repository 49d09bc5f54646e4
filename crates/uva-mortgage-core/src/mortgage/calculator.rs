use serde::Serialize;

use super::amortization::{calculate_mortgage, LoanCalculation, PaymentScheduleEntry, ScheduleOptions};
use super::quote::{LoanForm, LoanQuote};
use crate::types::ComputationOutput;
use crate::MortgageResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CalculatorState {
    Idle,
    Computed { schedule_visible: bool },
}

/// One user's calculator: the last priced quote and whether its schedule is shown.
#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    options: ScheduleOptions,
    quote: Option<LoanQuote>,
    output: Option<ComputationOutput<LoanCalculation>>,
    schedule_visible: bool,
}

impl LoanCalculator {
    pub fn new(options: ScheduleOptions) -> Self {
        LoanCalculator {
            options,
            ..Default::default()
        }
    }

    pub fn state(&self) -> CalculatorState {
        match self.output {
            None => CalculatorState::Idle,
            Some(_) => CalculatorState::Computed {
                schedule_visible: self.schedule_visible,
            },
        }
    }

    /// Price the form. An incomplete form does nothing and yields `Ok(None)`;
    /// an invalid one returns the error and keeps the previous result.
    pub fn submit(
        &mut self,
        form: &LoanForm,
    ) -> MortgageResult<Option<&ComputationOutput<LoanCalculation>>> {
        let Some(quote) = form.to_quote() else {
            return Ok(None);
        };

        let output = calculate_mortgage(&quote, &self.options)?;
        self.quote = Some(quote);
        self.output = Some(output);
        Ok(self.output.as_ref())
    }

    /// Show or hide the schedule of the current result. No-op while idle.
    pub fn toggle_schedule(&mut self) -> bool {
        if self.output.is_some() {
            self.schedule_visible = !self.schedule_visible;
        }
        self.schedule_visible
    }

    pub fn quote(&self) -> Option<&LoanQuote> {
        self.quote.as_ref()
    }

    pub fn output(&self) -> Option<&ComputationOutput<LoanCalculation>> {
        self.output.as_ref()
    }

    pub fn visible_schedule(&self) -> Option<&[PaymentScheduleEntry]> {
        match (&self.output, self.schedule_visible) {
            (Some(out), true) => Some(&out.result.schedule),
            _ => None,
        }
    }

    /// The current result as it should be displayed: schedule stripped when hidden.
    pub fn presented(&self) -> Option<ComputationOutput<LoanCalculation>> {
        let mut out = self.output.clone()?;
        if !self.schedule_visible {
            out.result.schedule.clear();
        }
        Some(out)
    }
}
