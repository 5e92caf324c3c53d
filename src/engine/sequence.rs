//! Balance sequencer: deterministic ordering plus a running balance
//!
//! Both the on-screen tables and the exporter show each row with the
//! balance *after* applying it. Bills add their resolved amount, credits
//! subtract it, and the total starts at zero for the scope of one call —
//! callers wanting a per-company reset invoke this once per company slice.

use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::engine::AnnotatedRecord;
use crate::types::RecordCategory;

/// One ordered row with the balance after applying it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencedRecord {
    pub record: AnnotatedRecord,
    pub running_balance: BigDecimal,
}

/// Order records and compute the running balance across them.
///
/// Global mode (`grouped = false`): name ascending (case-insensitive),
/// bills before credits within a name. Per-company mode (`grouped =
/// true`): bills before credits, then by the `date` column ascending
/// lexicographically when present, stable order otherwise.
pub fn sequence(records: &[AnnotatedRecord], grouped: bool) -> Vec<SequencedRecord> {
    let mut sorted = records.to_vec();

    if grouped {
        sorted.sort_by(|a, b| {
            a.record
                .category
                .cmp(&b.record.category)
                .then_with(|| date_of(a).cmp(date_of(b)))
        });
    } else {
        sorted.sort_by(|a, b| {
            name_of(a)
                .cmp(&name_of(b))
                .then_with(|| a.record.category.cmp(&b.record.category))
        });
    }

    let mut running = BigDecimal::from(0);
    sorted
        .into_iter()
        .map(|entry| {
            apply(&mut running, &entry);
            SequencedRecord {
                running_balance: running.clone(),
                record: entry,
            }
        })
        .collect()
}

/// Export row order: counterparty name first, then the per-company order
pub(crate) fn export_cmp(a: &AnnotatedRecord, b: &AnnotatedRecord) -> Ordering {
    name_of(a)
        .cmp(&name_of(b))
        .then_with(|| a.record.category.cmp(&b.record.category))
        .then_with(|| date_of(a).cmp(date_of(b)))
}

/// Add or subtract one record's resolved amount
pub(crate) fn apply(running: &mut BigDecimal, entry: &AnnotatedRecord) {
    match entry.record.category {
        RecordCategory::Bill => *running += &entry.amount,
        RecordCategory::Credit => *running -= &entry.amount,
    }
}

fn name_of(entry: &AnnotatedRecord) -> String {
    entry.record.name.to_lowercase()
}

fn date_of(entry: &AnnotatedRecord) -> &str {
    entry.record.field_ci("date").unwrap_or("")
}
