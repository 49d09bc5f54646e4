use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),
}

impl From<chrono::ParseError> for MortgageError {
    fn from(e: chrono::ParseError) -> Self {
        MortgageError::DateError(e.to_string())
    }
}
