use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Array(items) = result_obj {
        // One line per record: its name or label, then its key value
        for item in items {
            let name = item
                .get("name")
                .or_else(|| item.get("label"))
                .map(format_minimal);
            let value = item
                .get("projection")
                .and_then(key_value)
                .or_else(|| key_value(item));
            match (name, value) {
                (Some(n), Some(v)) => println!("{}: {}", n, format_minimal(v)),
                (_, Some(v)) => println!("{}", format_minimal(v)),
                _ => println!("{}", format_minimal(item)),
            }
        }
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some(val) = key_value(result_obj) {
            println!("{}", format_minimal(val));
            return;
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

/// First non-null well-known result field, in priority order.
fn key_value(value: &Value) -> Option<&Value> {
    const PRIORITY_KEYS: [&str; 7] = [
        "total_return",
        "commission",
        "rate",
        "risk_status",
        "reason",
        "breached_months",
        "approved",
    ];
    let map = value.as_object()?;
    PRIORITY_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
