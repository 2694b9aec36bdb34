pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Expand nested objects one level into dotted keys (`projection.irr`).
/// Arrays and deeper values are kept whole.
pub fn flatten_record(map: &Map<String, Value>) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (k, v) in inner {
                    out.push((format!("{key}.{k}"), v));
                }
            }
            _ => out.push((key.clone(), val)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_record() {
        let value = json!({"name": "Base Case", "projection": {"irr": "0.1", "tier_label": "Entry Tier"}});
        let keys: Vec<String> = flatten_record(value.as_object().unwrap())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["name", "projection.irr", "projection.tier_label"]);
    }
}
