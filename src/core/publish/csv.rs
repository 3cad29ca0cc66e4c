//! CSV serialization of the joined dataset
//!
//! Flat delimited text with a header row. Column order is fixed:
//! `entity_id,entity_name,activity_count,activity_date`. Null count/date
//! cells are empty; dates are ISO (`%Y-%m-%d`).

use crate::domain::JoinedRow;
use std::borrow::Cow;

/// Header row of every artifact
pub const HEADER: &str = "entity_id,entity_name,activity_count,activity_date";

/// Serialize the dataset to CSV
///
/// Output is a pure function of the rows, so two runs over identical
/// datasets produce byte-identical artifacts.
pub fn serialize_dataset(rows: &[JoinedRow]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + rows.len() * 32);
    out.push_str(HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&row.entity_id.to_string());
        out.push(',');
        out.push_str(&escape_field(&row.entity_name));
        out.push(',');
        if let Some(count) = row.activity_count {
            out.push_str(&count.to_string());
        }
        out.push(',');
        if let Some(date) = row.activity_date {
            out.push_str(&date.format("%Y-%m-%d").to_string());
        }
        out.push('\n');
    }

    out
}

/// Quote a field if it contains a delimiter, quote, or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
