//! Integration tests for recon-core

use bigdecimal::BigDecimal;
use recon_core::{
    reconcile, sequence, serialize, ReconError, ReconResult, RecordCategory, RecordStore,
    SpreadsheetSource, Summary,
};

const BILLS_CSV: &str = "Name,Date,Total\n\
                         Acme,2024-01-05,100\n\
                         Globex,2024-01-07,250.50\n\
                         Acme,2024-02-01,$1,200\n";

const CREDITS_CSV: &str = "Name,Date,Total\n\
                           acme,2024-01-20,30\n\
                           Globex,2024-02-11,\"1,000\"\n";

#[test]
fn test_complete_reconciliation_workflow() {
    let mut store = RecordStore::new();

    let bill_count = store.load_text(RecordCategory::Bill, BILLS_CSV).unwrap();
    let credit_count = store.load_text(RecordCategory::Credit, CREDITS_CSV).unwrap();
    assert_eq!(bill_count, 3);
    assert_eq!(credit_count, 2);

    let result = store.search("").unwrap();
    assert_eq!(result.records.len(), 5);
    assert_eq!(result.groups.len(), 2);

    // "Acme,2024-02-01,$1,200" splits on the unquoted comma, so the Total
    // cell is "$1" — fuzzy ingestion keeps the row at value 1.
    let acme = result.group("ACME").unwrap();
    assert_eq!(acme.name, "Acme");
    assert_eq!(acme.bills.len(), 2);
    assert_eq!(acme.credits.len(), 1);

    let summary = &result.summary;
    assert_eq!(summary.total_bills, "351.50".parse::<BigDecimal>().unwrap());
    assert_eq!(summary.total_credits, BigDecimal::from(1030));
    assert_eq!(
        summary.net_balance,
        "-678.50".parse::<BigDecimal>().unwrap()
    );

    // Summary round-trip: per-company balances sum to the net balance.
    let company_total: BigDecimal = summary.companies.iter().map(|c| c.balance.clone()).sum();
    assert_eq!(company_total, summary.net_balance);

    let doc = store.export().unwrap();
    assert!(doc.filename.starts_with("business_transactions_"));
    assert!(doc.filename.ends_with(".csv"));
    assert_eq!(doc.content_type, "text/csv");
    assert!(doc.content.contains("COMPANY SUMMARY"));
}

#[test]
fn test_scenario_bills_minus_credits() {
    let mut store = RecordStore::new();
    store
        .load_text(RecordCategory::Bill, "Name,Total\nAcme,100\n")
        .unwrap();
    store
        .load_text(RecordCategory::Credit, "Name,Total\nAcme,30\n")
        .unwrap();

    let summary = store.search("").unwrap().summary;
    assert_eq!(summary.net_balance, BigDecimal::from(70));
    assert_eq!(summary.companies.len(), 1);
    assert_eq!(summary.companies[0].balance, BigDecimal::from(70));
}

#[test]
fn test_scenario_case_insensitive_grouping() {
    let bills = recon_core::parser::parse("Name,Total\nAcme,200\n", RecordCategory::Bill).unwrap();
    let credits =
        recon_core::parser::parse("Name,Total\nacme,50\n", RecordCategory::Credit).unwrap();

    let result = reconcile(&bills, &credits, None);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].name, "Acme");
    assert_eq!(result.summary.companies[0].balance, BigDecimal::from(150));
}

#[test]
fn test_scenario_currency_text_resolves() {
    let bills = recon_core::parser::parse(
        "Name,Total\nAcme,\"$1,234.56\"\n",
        RecordCategory::Bill,
    )
    .unwrap();

    assert_eq!(bills[0].total, "1234.56".parse::<BigDecimal>().unwrap());
    assert_eq!(
        bills[0].resolved_amount(),
        "1234.56".parse::<BigDecimal>().unwrap()
    );
}

#[test]
fn test_scenario_empty_search_matches_show_all() {
    let mut store = RecordStore::new();
    store.load_text(RecordCategory::Bill, BILLS_CSV).unwrap();
    store.load_text(RecordCategory::Credit, CREDITS_CSV).unwrap();

    let searched = store.search("").unwrap();
    let show_all = reconcile(store.bills(), store.credits(), None);

    assert_eq!(searched, show_all);
    assert_eq!(
        searched.records.len(),
        store.bills().len() + store.credits().len()
    );
}

#[test]
fn test_scenario_unparsable_amount_row_is_dropped() {
    let records =
        recon_core::parser::parse("Name,Total\nAcme,abc\n", RecordCategory::Bill).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_scenario_company_summary_section_threshold() {
    let one = recon_core::parser::parse("Name,Total\nAcme,100\n", RecordCategory::Bill).unwrap();
    let doc = serialize(&reconcile(&one, &[], None));
    assert!(!doc.contains("COMPANY SUMMARY"));

    let two = recon_core::parser::parse(
        "Name,Total\nGlobex,50\nAcme,100\n",
        RecordCategory::Bill,
    )
    .unwrap();
    let doc = serialize(&reconcile(&two, &[], None));
    let section = doc.split("COMPANY SUMMARY").nth(1).unwrap();
    let acme = section.find("\"Acme\"").unwrap();
    let globex = section.find("\"Globex\"").unwrap();
    assert!(acme < globex);
}

#[test]
fn test_reconcile_idempotence() {
    let mut store = RecordStore::new();
    store.load_text(RecordCategory::Bill, BILLS_CSV).unwrap();
    store.load_text(RecordCategory::Credit, CREDITS_CSV).unwrap();

    let first = store.search("glo").unwrap();
    let second = store.search("glo").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.records.len(), 2);
    assert_eq!(first.groups[0].name, "Globex");
}

#[test]
fn test_sequenced_export_agrees_with_per_company_sequencing() {
    let mut store = RecordStore::new();
    store.load_text(RecordCategory::Bill, BILLS_CSV).unwrap();
    store.load_text(RecordCategory::Credit, CREDITS_CSV).unwrap();

    let result = store.search("acme").unwrap();
    let sequenced = sequence(&result.records, true);

    // Bills by date, then the credit; each row carries the balance after it.
    let balances: Vec<String> = sequenced
        .iter()
        .map(|s| s.running_balance.to_string())
        .collect();
    assert_eq!(balances, vec!["100", "101", "71"]);

    let doc = store.export().unwrap();
    assert!(doc
        .content
        .contains("\"Acme\",\"Credit\",\"2024-01-20\",\"30\",\"71.00\""));
}

struct StubWorkbook;

impl SpreadsheetSource for StubWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        vec!["Summary".to_string(), "Invoices".to_string(), "Payments".to_string()]
    }

    fn sheet_to_delimited(&self, name: &str) -> ReconResult<String> {
        match name {
            "Invoices" => Ok("Name,Total\nAcme,100\nGlobex,40\n".to_string()),
            "Payments" => Ok("Name,Total\nAcme,60\n".to_string()),
            other => Err(ReconError::Adapter(format!("unknown sheet: {other}"))),
        }
    }
}

#[test]
fn test_workbook_upload_replaces_both_categories() {
    let mut store = RecordStore::new();
    store
        .load_text(RecordCategory::Bill, "Name,Total\nStale,999\n")
        .unwrap();

    let (bills, credits) = store.load_workbook(Some(&StubWorkbook)).unwrap();
    assert_eq!((bills, credits), (2, 1));
    assert_eq!(store.bills()[0].name, "Acme");

    let summary = store.search("").unwrap().summary;
    assert_eq!(summary.net_balance, BigDecimal::from(80));
}

#[test]
fn test_workbook_without_matching_sheets_keeps_prior_data() {
    struct NoMatch;
    impl SpreadsheetSource for NoMatch {
        fn sheet_names(&self) -> Vec<String> {
            vec!["Sheet1".to_string()]
        }
        fn sheet_to_delimited(&self, _name: &str) -> ReconResult<String> {
            Ok(String::new())
        }
    }

    let mut store = RecordStore::new();
    store
        .load_text(RecordCategory::Bill, "Name,Total\nAcme,100\n")
        .unwrap();

    let err = store.load_workbook(Some(&NoMatch)).unwrap_err();
    assert!(matches!(err, ReconError::NoMatchingSheets));
    assert_eq!(store.bills().len(), 1);
}

#[test]
fn test_summary_serde_round_trip() {
    let mut store = RecordStore::new();
    store.load_text(RecordCategory::Bill, BILLS_CSV).unwrap();
    store.load_text(RecordCategory::Credit, CREDITS_CSV).unwrap();

    let summary = store.search("").unwrap().summary;
    let json = serde_json::to_string(&summary).unwrap();
    let back: Summary = serde_json::from_str(&json).unwrap();
    assert_eq!(summary, back);
}
