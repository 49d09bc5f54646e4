use serde_json::Value;

use super::scalar_text;

/// Print just the key answer value from the output.
///
/// Looks for the headline field of each command in priority order, then
/// falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", minimal_text(result_obj));
}

fn minimal_text(result: &Value) -> String {
    // loan (raw), loan (--localized), index, rate
    let priority_keys = [
        "monthly_payment_nominal",
        "monthly_payment",
        "value",
        "annual_rate",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            match map.get(*key) {
                Some(Value::Object(amounts)) => {
                    if let Some(nominal) = amounts.get("nominal") {
                        return scalar_text(nominal);
                    }
                }
                Some(val) if !val.is_null() => return scalar_text(val),
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar_text(val));
        }
    }

    scalar_text(result)
}
