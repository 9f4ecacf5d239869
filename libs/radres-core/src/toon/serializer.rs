//! Document to TOON text.

use super::value::{Document, Mapping, Record, Scalar, Value};

const INDENT: &str = "  ";

/// Serialize a document.
///
/// Record lists take their columns from the first record's keys. Later
/// records emit `null` for missing columns and drop keys the first record
/// does not have.
pub fn stringify(doc: &Document) -> String {
    let mut out = String::new();
    for (key, value) in doc.iter() {
        write_entry(&mut out, key, value, 0);
    }
    out
}

fn write_mapping(out: &mut String, mapping: &Mapping, depth: usize) {
    for (key, value) in mapping {
        write_entry(out, key, value, depth);
    }
}

fn write_entry(out: &mut String, key: &str, value: &Value, depth: usize) {
    let pad = INDENT.repeat(depth);
    match value {
        Value::RecordList(records) => write_records(out, key, records, &pad),
        Value::Mapping(mapping) => {
            out.push_str(&format!("{pad}{key}:\n"));
            write_mapping(out, mapping, depth + 1);
        }
        Value::Scalar(scalar) => {
            out.push_str(&format!("{pad}{key}: {scalar}\n"));
        }
    }
}

fn write_records(out: &mut String, key: &str, records: &[Record], pad: &str) {
    let fields: Vec<&str> = records
        .first()
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default();

    out.push_str(&format!(
        "{pad}{key}[{}]{{{}}}:\n",
        records.len(),
        fields.join(",")
    ));
    for record in records {
        let row: Vec<String> = fields
            .iter()
            .map(|field| record.get(*field).map_or_else(|| "null".to_string(), csv_cell))
            .collect();
        out.push_str(&format!("{pad}{INDENT}{}\n", row.join(",")));
    }
}

/// Quote a cell when it contains a comma or a double quote.
fn csv_cell(scalar: &Scalar) -> String {
    let text = scalar.to_string();
    if text.contains(',') || text.contains('"') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}
