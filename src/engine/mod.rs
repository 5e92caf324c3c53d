//! Reconciliation engine: merge, group, and total the two record categories
//!
//! Everything here is a pure function of the category collections passed
//! in; results are freshly built values and never cached or mutated.

pub mod sequence;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{CompanySummary, CounterpartyGroup, Record, Summary};

pub use sequence::{sequence, SequencedRecord};

/// A record paired with its aggregation-time amount
///
/// The amount is resolved through [`Record::resolved_amount`] once, when
/// the result is built, so every downstream view works from the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    pub record: Record,
    pub amount: BigDecimal,
}

/// Output of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Annotated records, filtered bills first then filtered credits,
    /// each category in ingestion order
    pub records: Vec<AnnotatedRecord>,
    /// Union of header names across both categories, insertion-ordered
    pub headers: Vec<String>,
    /// Counterparty groups in first-encounter order
    pub groups: Vec<CounterpartyGroup>,
    /// Aggregate totals
    pub summary: Summary,
}

impl ReconciliationResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a counterparty group by name, case-insensitively
    pub fn group(&self, name: &str) -> Option<&CounterpartyGroup> {
        let key = name.to_lowercase();
        self.groups.iter().find(|g| g.key == key)
    }
}

/// Reconcile the two category collections, optionally filtered by a
/// case-insensitive substring of the counterparty name.
///
/// An empty or absent filter term means "all records". Deterministic for
/// identical inputs; holds no state beyond its arguments.
pub fn reconcile(
    bills: &[Record],
    credits: &[Record],
    filter: Option<&str>,
) -> ReconciliationResult {
    let term = filter
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());
    let matches =
        |record: &Record| term.as_deref().is_none_or(|t| record.name.to_lowercase().contains(t));

    let mut groups: Vec<CounterpartyGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<AnnotatedRecord> = Vec::new();

    for record in bills.iter().filter(|r| matches(r)) {
        let slot = group_slot(&mut groups, &mut index, record);
        groups[slot].bills.push(record.clone());
        records.push(AnnotatedRecord {
            amount: record.resolved_amount(),
            record: record.clone(),
        });
    }

    for record in credits.iter().filter(|r| matches(r)) {
        let slot = group_slot(&mut groups, &mut index, record);
        groups[slot].credits.push(record.clone());
        records.push(AnnotatedRecord {
            amount: record.resolved_amount(),
            record: record.clone(),
        });
    }

    let headers = header_union(bills, credits);
    let summary = calculate_summary(&groups);

    ReconciliationResult {
        records,
        headers,
        groups,
        summary,
    }
}

/// Find or create the group for a record's lowercased name, keeping the
/// first-seen casing as the display name
fn group_slot(
    groups: &mut Vec<CounterpartyGroup>,
    index: &mut HashMap<String, usize>,
    record: &Record,
) -> usize {
    let key = record.name.to_lowercase();
    *index.entry(key.clone()).or_insert_with(|| {
        groups.push(CounterpartyGroup::new(key, record.name.clone()));
        groups.len() - 1
    })
}

/// Union of the source header lists (bills file first, then any credits
/// headers not already seen). Drawn from the unfiltered collections so a
/// narrow search still shows the full column set.
fn header_union(bills: &[Record], credits: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();

    for record in bills.first().into_iter().chain(credits.first()) {
        for header in &record.headers {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
    }

    headers
}

/// Aggregate totals across groups in first-encounter order
fn calculate_summary(groups: &[CounterpartyGroup]) -> Summary {
    let mut total_bills = BigDecimal::from(0);
    let mut total_credits = BigDecimal::from(0);
    let mut companies = Vec::with_capacity(groups.len());

    for group in groups {
        let bill_sum: BigDecimal = group.bills.iter().map(|r| r.resolved_amount()).sum();
        let credit_sum: BigDecimal = group.credits.iter().map(|r| r.resolved_amount()).sum();
        let balance = &bill_sum - &credit_sum;

        total_bills += &bill_sum;
        total_credits += &credit_sum;

        companies.push(CompanySummary {
            name: group.name.clone(),
            bill_sum,
            credit_sum,
            balance,
        });
    }

    let net_balance = &total_bills - &total_credits;

    Summary {
        total_bills,
        total_credits,
        net_balance,
        companies,
    }
}
