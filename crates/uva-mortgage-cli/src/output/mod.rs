pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar JSON value as plain text.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into dotted `field.subfield` rows; arrays of rows
/// are left out and returned separately by [`row_arrays`].
pub(crate) fn flatten_fields(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match val {
                    Value::Object(_) => flatten_fields(&name, val, out),
                    Value::Array(arr) if arr.iter().any(Value::is_object) => {}
                    _ => out.push((name, scalar_text(val))),
                }
            }
        }
        other => out.push((prefix.to_string(), scalar_text(other))),
    }
}

/// Fields of `value` holding arrays of objects, such as an amortisation schedule.
pub(crate) fn row_arrays(value: &Value) -> Vec<(&str, &[Value])> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| match v {
                Value::Array(arr) if !arr.is_empty() && arr.iter().all(Value::is_object) => {
                    Some((k.as_str(), arr.as_slice()))
                }
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
