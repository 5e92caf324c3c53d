//! Basic reconciliation walkthrough

use recon_core::{sequence, RecordCategory, RecordStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Recon Core - Basic Reconciliation Example\n");

    let mut store = RecordStore::new();

    // 1. Upload the two category files
    println!("📥 Loading bills and credits...");
    let bills = store.load_text(
        RecordCategory::Bill,
        "Name,Date,Total\n\
         Acme,2024-01-05,1200\n\
         Globex,2024-01-09,\"$2,500.00\"\n\
         Acme,2024-02-01,800\n",
    )?;
    let credits = store.load_text(
        RecordCategory::Credit,
        "Name,Date,Total\n\
         acme,2024-01-20,1500\n\
         Globex,2024-02-14,2500\n",
    )?;
    println!("  ✓ {bills} invoices, {credits} payments loaded\n");

    // 2. Reconcile everything
    println!("🔍 Reconciling all records...");
    let result = store.search("")?;
    for company in &result.summary.companies {
        println!(
            "  {} — invoices {}, payments {}, balance {}",
            company.name, company.bill_sum, company.credit_sum, company.balance
        );
    }
    println!("  Net outstanding: {}\n", result.summary.net_balance);

    // 3. Per-company running balance for one counterparty
    println!("📊 Acme statement:");
    let acme = store.search("acme")?;
    for row in sequence(&acme.records, true) {
        println!(
            "  {:<6} {:>10} -> running {}",
            row.record.record.category.label(),
            row.record.amount,
            row.running_balance
        );
    }
    println!();

    // 4. Export the full dataset
    let doc = store.export()?;
    println!("💾 Export ready: {} ({})", doc.filename, doc.content_type);
    println!("{}", doc.content);

    Ok(())
}
