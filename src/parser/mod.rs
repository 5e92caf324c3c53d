//! Tabular parser: delimited text in, structured records out
//!
//! The first line is the header row; the name and amount columns are
//! discovered by keyword rather than fixed position, so files exported from
//! different systems ("Vendor"/"Price", "Client"/"Amount Due", ...) all
//! load without remapping.

use bigdecimal::BigDecimal;

use crate::types::{ReconError, ReconResult, Record, RecordCategory};
use crate::utils::parse_amount;

/// Name-column keywords, in priority order
pub const NAME_KEYWORDS: [&str; 5] = ["name", "company", "client", "vendor", "supplier"];

/// Amount-column keywords, in priority order
pub const AMOUNT_KEYWORDS: [&str; 5] = ["total", "amount", "sum", "value", "price"];

/// Parse delimited text into records for the given category.
///
/// Input with fewer than two lines is "no data", not an error: callers get
/// an empty set back. Failure to resolve the name or amount column aborts
/// the whole file with [`ReconError::MissingColumns`]. Rows are kept only
/// when they cover both resolved columns, carry a non-empty name, and their
/// amount text parses to a non-zero value; everything else is dropped
/// silently.
pub fn parse(text: &str, category: RecordCategory) -> ReconResult<Vec<Record>> {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    // Header row is split naively on commas; only data rows get quote handling.
    let headers: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();
    let headers_lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let name_column = find_column(&headers_lower, &NAME_KEYWORDS);
    let total_column = find_column(&headers_lower, &AMOUNT_KEYWORDS);
    let (name_column, total_column) = match (name_column, total_column) {
        (Some(name), Some(total)) => (name, total),
        _ => return Err(ReconError::MissingColumns),
    };

    let zero = BigDecimal::from(0);
    let mut records = Vec::new();

    for line in &lines[1..] {
        let row = split_row(line);
        if row.len() <= name_column.max(total_column) {
            continue;
        }

        let name = row[name_column].clone();
        let total = parse_amount(&row[total_column]);
        if name.is_empty() || total == zero {
            continue;
        }

        let row_data = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect();

        records.push(Record {
            name,
            total,
            headers: headers.clone(),
            row_data,
            category,
        });
    }

    Ok(records)
}

/// Find the first header containing any keyword, scanning keywords in
/// priority order: the first keyword with a matching header wins, ties
/// within a header list go to keyword priority, not header order.
fn find_column(headers_lower: &[String], keywords: &[&str]) -> Option<usize> {
    for keyword in keywords {
        if let Some(index) = headers_lower.iter().position(|h| h.contains(keyword)) {
            return Some(index);
        }
    }
    None
}

/// Split one data row on commas with double-quote quoting.
///
/// A quote toggles the in-quotes flag and is dropped; a comma inside a
/// quoted region is data. Doubled quotes are not collapsed to a literal
/// quote — this deliberately matches the historical exporter-side format
/// rather than RFC 4180. Every field is trimmed.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
