//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::utils::parse_amount;

/// Category of a financial record
///
/// Bills are obligations owed to the uploader; credits are settlements
/// received against them. `Bill` orders before `Credit`, which is the
/// ordering every sequenced view relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordCategory {
    /// An obligation (invoice) — adds to the running balance
    Bill,
    /// A settlement (payment) — subtracts from the running balance
    Credit,
}

impl RecordCategory {
    /// Lowercase name, as stored in source data
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCategory::Bill => "bill",
            RecordCategory::Credit => "credit",
        }
    }

    /// Capitalized form used in exported documents
    pub fn label(&self) -> &'static str {
        match self {
            RecordCategory::Bill => "Bill",
            RecordCategory::Credit => "Credit",
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row ingested from a source file
///
/// A record keeps every original column (`headers` + `row_data`), not just
/// the two resolved ones, so display and export can surface arbitrary extra
/// fields. Records are immutable after parsing; iteration over `row_data`
/// always goes through `headers` to preserve source column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Counterparty name (non-empty at ingestion)
    pub name: String,
    /// Amount found in the parser-resolved amount column (non-zero at ingestion)
    pub total: BigDecimal,
    /// Ordered column names of the source file
    pub headers: Vec<String>,
    /// Header to trimmed raw value, original formatting preserved
    pub row_data: HashMap<String, String>,
    /// Which category collection this record belongs to
    pub category: RecordCategory,
}

impl Record {
    /// Resolve the monetary value to use for all balance math.
    ///
    /// Looks for a header literally equal to `total` or `amount`
    /// (case-insensitive, exact match — unlike the parser's substring
    /// resolution) and parses that cell; falls back to the parse-time
    /// `total` when no such header exists. The two resolutions can
    /// disagree; this one always wins for summary math.
    pub fn resolved_amount(&self) -> BigDecimal {
        let column = self.headers.iter().find(|h| {
            let lower = h.to_lowercase();
            lower == "total" || lower == "amount"
        });

        match column {
            Some(header) => {
                let raw = self.row_data.get(header).map(String::as_str).unwrap_or("0");
                parse_amount(raw)
            }
            None => self.total.clone(),
        }
    }

    /// Case-insensitive column lookup (used for the optional `date` field)
    pub fn field_ci(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.eq_ignore_ascii_case(key))
            .and_then(|h| self.row_data.get(h))
            .map(String::as_str)
    }
}

/// All records for one counterparty, keyed case-insensitively by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyGroup {
    /// Lowercased grouping key
    pub key: String,
    /// Display name (first-seen casing)
    pub name: String,
    /// Bills belonging to this counterparty, in ingestion order
    pub bills: Vec<Record>,
    /// Credits belonging to this counterparty, in ingestion order
    pub credits: Vec<Record>,
}

impl CounterpartyGroup {
    pub fn new(key: String, name: String) -> Self {
        Self {
            key,
            name,
            bills: Vec::new(),
            credits: Vec::new(),
        }
    }
}

/// Per-counterparty totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    /// Display name (first-seen casing)
    pub name: String,
    /// Sum of resolved bill amounts
    pub bill_sum: BigDecimal,
    /// Sum of resolved credit amounts
    pub credit_sum: BigDecimal,
    /// `bill_sum - credit_sum` (positive means outstanding)
    pub balance: BigDecimal,
}

/// Aggregate totals across a reconciliation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all resolved bill amounts
    pub total_bills: BigDecimal,
    /// Sum of all resolved credit amounts
    pub total_credits: BigDecimal,
    /// `total_bills - total_credits`; positive means money owed to the uploader
    pub net_balance: BigDecimal,
    /// Per-counterparty breakdown, in first-encounter order
    pub companies: Vec<CompanySummary>,
}

/// Errors that can occur in the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Could not find Name and Total columns")]
    MissingColumns,
    #[error("Spreadsheet adapter unavailable")]
    AdapterUnavailable,
    #[error("Spreadsheet adapter error: {0}")]
    Adapter(String),
    #[error("No sheet names matched bills or credits")]
    NoMatchingSheets,
    #[error("No records loaded")]
    EmptyDataset,
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
