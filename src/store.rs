//! Reconciliation state and the request/response surface around it
//!
//! `RecordStore` is the only mutable thing in the crate: two category
//! collections replaced wholesale on each upload. Every query computes a
//! fresh result value, so repeated calls are side-effect free and a reader
//! can never observe a half-updated state.

use crate::engine::{self, ReconciliationResult};
use crate::export::{self, ExportDocument};
use crate::parser;
use crate::types::{ReconError, ReconResult, Record, RecordCategory};
use crate::workbook::{self, SpreadsheetSource};

/// The two category collections and the operations over them
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    bills: Vec<Record>,
    credits: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bills(&self) -> &[Record] {
        &self.bills
    }

    pub fn credits(&self) -> &[Record] {
        &self.credits
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty() && self.credits.is_empty()
    }

    /// Replace one category collection wholesale (single assignment)
    pub fn load_category(&mut self, category: RecordCategory, records: Vec<Record>) {
        log::debug!("loaded {} {} records", records.len(), category);
        match category {
            RecordCategory::Bill => self.bills = records,
            RecordCategory::Credit => self.credits = records,
        }
    }

    /// Parse delimited text and replace that category, returning the record
    /// count. A parse failure leaves previously loaded data untouched.
    pub fn load_text(&mut self, category: RecordCategory, text: &str) -> ReconResult<usize> {
        let records = parser::parse(text, category)?;
        let count = records.len();
        self.load_category(category, records);
        Ok(count)
    }

    /// Load a binary workbook through the adapter capability, replacing
    /// both collections. Returns `(bills, credits)` counts.
    ///
    /// `None` means the host ships no decoder: the excel path fails with
    /// [`ReconError::AdapterUnavailable`] while text uploads keep working.
    pub fn load_workbook(
        &mut self,
        adapter: Option<&dyn SpreadsheetSource>,
    ) -> ReconResult<(usize, usize)> {
        let source = adapter.ok_or(ReconError::AdapterUnavailable)?;
        let loaded = workbook::load_workbook(source)?;

        let counts = (loaded.bills.len(), loaded.credits.len());
        self.bills = loaded.bills;
        self.credits = loaded.credits;
        log::debug!("workbook loaded: {} bills, {} credits", counts.0, counts.1);
        Ok(counts)
    }

    /// Drop both collections (the "clear all files" reset)
    pub fn clear(&mut self) {
        self.bills = Vec::new();
        self.credits = Vec::new();
    }

    /// Search by counterparty name, case-insensitive substring. An empty
    /// term shows all records; an empty store is a user-facing prompt, not
    /// a crash.
    pub fn search(&self, term: &str) -> ReconResult<ReconciliationResult> {
        if self.is_empty() {
            return Err(ReconError::EmptyDataset);
        }
        Ok(engine::reconcile(&self.bills, &self.credits, Some(term)))
    }

    /// Render the full dataset as an export document
    pub fn export(&self) -> ReconResult<ExportDocument> {
        if self.is_empty() {
            return Err(ReconError::EmptyDataset);
        }
        let result = engine::reconcile(&self.bills, &self.credits, None);
        Ok(ExportDocument::new(export::serialize(&result)))
    }
}
