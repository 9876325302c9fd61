use crate::record::{BenchmarkRow, FIELD_NAMES};

pub(super) fn csv_header() -> String {
    let mut line = FIELD_NAMES.join(",");
    line.push('\n');
    line
}

pub(super) fn csv_line(row: &BenchmarkRow) -> String {
    let fields: Vec<String> = row.fields().iter().map(|field| csv_field(field)).collect();
    let mut line = fields.join(",");
    line.push('\n');
    line
}

/// Quotes a field when it contains a separator, quote or line break.
pub(super) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
