//! # Recon Core
//!
//! A reconciliation engine for two categories of financial records —
//! obligations ("bills") and settlements ("credits") — uploaded as tabular
//! files, grouped by counterparty, with running and aggregate balances and
//! a delimited export.
//!
//! ## Features
//!
//! - **Flexible tabular parsing**: name and amount columns discovered by
//!   keyword, every original column preserved per record
//! - **Spreadsheet adapter seam**: binary workbooks consumed through a
//!   capability trait, sheets mapped to categories by name
//! - **Counterparty grouping**: case-insensitive keys, first-seen display
//!   names, per-company and aggregate balances
//! - **Balance sequencing**: deterministic ordering with a running balance
//!   for display and export
//! - **Export serialization**: byte-stable delimited documents with
//!   summary sections
//!
//! ## Quick Start
//!
//! ```rust
//! use recon_core::{RecordCategory, RecordStore};
//! use bigdecimal::BigDecimal;
//!
//! let mut store = RecordStore::new();
//! store
//!     .load_text(RecordCategory::Bill, "Name,Total\nAcme,100\n")
//!     .unwrap();
//! store
//!     .load_text(RecordCategory::Credit, "Name,Total\nAcme,30\n")
//!     .unwrap();
//!
//! let result = store.search("acme").unwrap();
//! assert_eq!(result.summary.net_balance, BigDecimal::from(70));
//! ```

pub mod engine;
pub mod export;
pub mod parser;
pub mod store;
pub mod types;
pub mod utils;
pub mod workbook;

// Re-export commonly used types
pub use engine::{reconcile, sequence, AnnotatedRecord, ReconciliationResult, SequencedRecord};
pub use export::{export_filename, serialize, ExportDocument, CSV_CONTENT_TYPE};
pub use store::RecordStore;
pub use types::*;
pub use workbook::{load_workbook, SpreadsheetSource, WorkbookRecords};
