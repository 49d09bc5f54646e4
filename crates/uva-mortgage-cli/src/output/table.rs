use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_fields, row_arrays, scalar_text};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let (result, envelope) = match value {
        Value::Object(map) => (map.get("result").unwrap_or(value), Some(map)),
        _ => (value, None),
    };

    println!("{}", field_table(result));

    for (name, rows) in row_arrays(result) {
        println!("\n{}:", name);
        println!("{}", rows_table(rows));
    }

    let Some(envelope) = envelope else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(value: &Value) -> Table {
    let mut fields = Vec::new();
    flatten_fields("", value, &mut fields);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key, val]);
    }
    builder.build()
}

/// One row per object; headers taken from the first one.
fn rows_table(rows: &[Value]) -> Table {
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    };

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default()),
            );
        }
    }
    builder.build()
}
