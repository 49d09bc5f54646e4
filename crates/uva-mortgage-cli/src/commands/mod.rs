pub mod index;
pub mod loan;
pub mod rate;

/// Parse a yes/no answer as typed in the quote form.
pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "y" | "si" | "sí" | "s" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(format!("expected yes or no, got '{other}'")),
    }
}
