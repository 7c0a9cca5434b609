//! # CSV Export
//!
//! Comma-delimited UTF-8 rendering of a record sequence.
//!
//! ## Format
//!
//! ```text
//! header row: field names of the first record
//! body:       one line per record, values in their default string form
//! ```
//!
//! - Lines are separated by `\n`
//! - A value containing a comma, a double quote, CR or LF is wrapped in double
//!   quotes, with embedded quotes doubled
//! - Absent optional values render as empty cells

use crate::record::Fields;
use crate::RosterError;
use std::path::Path;

/// Default file name for exports.
pub const DEFAULT_EXPORT_FILE: &str = "export.csv";

/// Quote a cell if it contains a delimiter, quote or line break.
#[must_use]
pub fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render `items` as CSV. Returns `None` for empty input.
#[must_use]
pub fn to_csv<T: Fields>(items: &[T]) -> Option<String> {
    let headers = items.first()?.field_names();

    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for item in items {
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                item.field(h)
                    .map(|v| escape_cell(&v.to_string()))
                    .unwrap_or_default()
            })
            .collect();
        lines.push(row.join(","));
    }
    Some(lines.join("\n"))
}

/// Write the CSV rendering of `items` to `path`.
///
/// Returns `Ok(false)` without touching the file system for empty input.
pub fn write_csv<T: Fields>(path: &Path, items: &[T]) -> Result<bool, RosterError> {
    let Some(csv) = to_csv(items) else {
        return Ok(false);
    };
    std::fs::write(path, csv)
        .map_err(|e| RosterError::IoError(format!("Cannot write {}: {}", path.display(), e)))?;
    Ok(true)
}

// =============================================================================
// TESTS
// =============================================================================
