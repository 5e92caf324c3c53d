//! Spreadsheet adapter seam
//!
//! The engine never decodes binary workbooks itself. It consumes a decoder
//! only through the [`SpreadsheetSource`] capability — enumerate named
//! sheets, convert one to delimited text — and maps sheet names to record
//! categories before delegating to the tabular parser.

use crate::parser;
use crate::types::{ReconError, ReconResult, Record, RecordCategory};

/// Sheet-name keywords marking a bills source, in priority order
pub const BILL_SHEET_KEYWORDS: [&str; 3] = ["bill", "invoice", "inv"];

/// Sheet-name keywords marking a credits source, in priority order
pub const CREDIT_SHEET_KEYWORDS: [&str; 4] = ["credit", "payment", "pay", "receipt"];

/// Capability contract for an external spreadsheet decoder
///
/// Implementations wrap whatever binary decoder the host application ships;
/// the engine only needs named sheets and a delimited-text rendering of
/// each.
pub trait SpreadsheetSource: Send + Sync {
    /// Names of all sheets in the workbook, in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Convert one named sheet to delimited text (first line = header row)
    fn sheet_to_delimited(&self, name: &str) -> ReconResult<String>;
}

/// Records extracted from one workbook, already split by category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookRecords {
    pub bills: Vec<Record>,
    pub credits: Vec<Record>,
}

/// Load a workbook through the adapter capability.
///
/// The first sheet whose lowercased name contains a bills keyword becomes
/// the bills source; likewise for credits. A workbook matching neither
/// category is rejected with [`ReconError::NoMatchingSheets`]. A category
/// with no matching sheet simply comes back empty — a workbook upload is a
/// complete snapshot of both collections.
pub fn load_workbook(source: &dyn SpreadsheetSource) -> ReconResult<WorkbookRecords> {
    let names = source.sheet_names();
    let bills_sheet = find_sheet(&names, &BILL_SHEET_KEYWORDS);
    let credits_sheet = find_sheet(&names, &CREDIT_SHEET_KEYWORDS);

    if bills_sheet.is_none() && credits_sheet.is_none() {
        return Err(ReconError::NoMatchingSheets);
    }

    let mut workbook = WorkbookRecords::default();

    if let Some(sheet) = bills_sheet {
        let text = source.sheet_to_delimited(sheet)?;
        workbook.bills = parser::parse(&text, RecordCategory::Bill)?;
        log::debug!("sheet '{}' loaded as bills ({} records)", sheet, workbook.bills.len());
    }

    if let Some(sheet) = credits_sheet {
        let text = source.sheet_to_delimited(sheet)?;
        workbook.credits = parser::parse(&text, RecordCategory::Credit)?;
        log::debug!(
            "sheet '{}' loaded as credits ({} records)",
            sheet,
            workbook.credits.len()
        );
    }

    Ok(workbook)
}

/// First sheet whose lowercased name contains any keyword, scanning
/// keywords in priority order
fn find_sheet<'a>(names: &'a [String], keywords: &[&str]) -> Option<&'a str> {
    for keyword in keywords {
        if let Some(name) = names.iter().find(|n| n.to_lowercase().contains(keyword)) {
            return Some(name);
        }
    }
    None
}
