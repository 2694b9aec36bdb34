use serde_json::{Map, Value};
use std::io;

use super::flatten_record;

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// An object result becomes `field,value` rows; arrays of records inside it
/// (yearly returns, monthly intake) follow as their own blocks, separated by
/// a blank line. An array result becomes one row per record.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => write_object_csv(&mut wtr, map),
        Value::Array(arr) => write_records(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_object_csv(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    let mut blocks = Vec::new();
    for (key, val) in flatten_record(map) {
        match val {
            Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                blocks.push(rows)
            }
            _ => {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
    }
    for rows in blocks {
        let _ = wtr.write_record([""]);
        write_records(wtr, rows);
    }
}

fn write_records(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    // Headers from the first record, nested objects expanded one level
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([format_csv_value(item)]);
        }
        return;
    };

    let headers: Vec<String> = flatten_record(first).into_iter().map(|(k, _)| k).collect();
    let _ = wtr.write_record(&headers);

    for item in arr.iter().filter_map(Value::as_object) {
        let cells = flatten_record(item);
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| format_csv_value(v))
                    .unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
