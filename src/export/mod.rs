//! Export serializer: a reconciliation result as a delimited document
//!
//! The textual conventions here (quoting, sign handling, section spacing)
//! are load-bearing: downstream tooling diffs exported files, so the
//! output must be byte-stable for identical inputs.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::sequence::{apply, export_cmp};
use crate::engine::ReconciliationResult;
use crate::utils::{format_fixed2, format_signed_fixed2};

/// Content type of exported documents
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A rendered export with its download metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// `business_transactions_<ISO-date>.csv`
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

impl ExportDocument {
    /// Wrap serialized content, stamped with today's date (UTC)
    pub fn new(content: String) -> Self {
        Self::with_date(content, Utc::now().date_naive())
    }

    pub fn with_date(content: String, date: NaiveDate) -> Self {
        Self {
            filename: export_filename(date),
            content_type: CSV_CONTENT_TYPE.to_string(),
            content,
        }
    }
}

/// Filename convention for exported documents
pub fn export_filename(date: NaiveDate) -> String {
    format!("business_transactions_{}.csv", date.format("%Y-%m-%d"))
}

/// Render a reconciliation result as a delimited-text document.
///
/// Rows are ordered by counterparty name, bills before credits, then by
/// the `date` column; the running balance resets to zero whenever the
/// counterparty changes and a blank line separates company blocks. A
/// `SUMMARY` section always follows; a `COMPANY SUMMARY` section is added
/// only when more than one counterparty exists.
pub fn serialize(result: &ReconciliationResult) -> String {
    let data_headers: Vec<&String> = result
        .headers
        .iter()
        .filter(|h| !h.eq_ignore_ascii_case("name"))
        .collect();

    let mut out = String::from("Company,Type");
    for header in &data_headers {
        out.push(',');
        out.push_str(header);
    }
    out.push_str(",Running Balance\n");

    let mut rows = result.records.clone();
    rows.sort_by(export_cmp);

    let mut running = BigDecimal::from(0);
    let mut current_company: Option<String> = None;

    for entry in &rows {
        let key = entry.record.name.to_lowercase();
        if current_company.as_deref() != Some(key.as_str()) {
            running = BigDecimal::from(0);
            if current_company.is_some() {
                out.push('\n');
            }
            current_company = Some(key);
        }

        apply(&mut running, entry);

        let mut fields = vec![quote(&entry.record.name), quote(entry.record.category.label())];
        for header in &data_headers {
            let value = entry
                .record
                .row_data
                .get(*header)
                .map(String::as_str)
                .unwrap_or("");
            fields.push(quote(value));
        }
        fields.push(quote(&format_signed_fixed2(&running)));

        out.push_str(&fields.join(","));
        out.push('\n');
    }

    let summary = &result.summary;
    out.push_str("\n\nSUMMARY\n");
    out.push_str(&format!("\"Total Companies\",\"{}\"\n", result.groups.len()));
    out.push_str(&format!("\"Total Records\",\"{}\"\n", result.records.len()));
    out.push_str(&format!(
        "\"Total Invoices\",\"{}\"\n",
        format_fixed2(&summary.total_bills)
    ));
    out.push_str(&format!(
        "\"Total Payments\",\"{}\"\n",
        format_fixed2(&summary.total_credits)
    ));
    out.push_str(&format!(
        "\"Net Outstanding\",\"{}\"\n",
        format_fixed2(&summary.net_balance)
    ));

    if summary.companies.len() > 1 {
        out.push_str("\n\nCOMPANY SUMMARY\n");
        out.push_str(
            "\"Company Name\",\"Total Invoices\",\"Total Payments\",\"Outstanding Balance\"\n",
        );

        let mut companies = summary.companies.clone();
        companies.sort_by_key(|c| c.name.to_lowercase());

        for company in &companies {
            out.push_str(&format!(
                "{},{},{},{}\n",
                quote(&company.name),
                quote(&format_fixed2(&company.bill_sum)),
                quote(&format_fixed2(&company.credit_sum)),
                quote(&format_fixed2(&company.balance)),
            ));
        }
    }

    out
}

/// Double-quote a field, doubling embedded quotes
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
