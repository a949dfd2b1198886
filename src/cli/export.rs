use crate::classifier::classify_snapshot;
use crate::cli::{authenticate, ledger_client};
use crate::error::Result;
use crate::settings::load_settings;

/// Dump the classified snapshot to CSV for offline bookkeeping.
pub fn run(user: Option<&str>, output: Option<String>) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    authenticate(&settings, &client, user)?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let classified = classify_snapshot(&snapshot);

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match &output {
        Some(path) => csv::Writer::from_writer(Box::new(std::fs::File::create(path)?)),
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };

    writer.write_record([
        "row",
        "stage",
        "unique_no",
        "unit",
        "pay_to",
        "requested_amount",
        "approved_amount",
        "payment_type",
        "paid_date",
        "tally_date",
        "remarks",
    ])?;
    for (req, stage) in &classified {
        writer.write_record([
            req.row.to_string(),
            stage.label().to_string(),
            req.unique_no.clone(),
            req.unit.clone(),
            req.pay_to.clone(),
            format!("{}", req.amount),
            req.approved_amount.map(|a| format!("{a}")).unwrap_or_default(),
            req.payment_type.clone(),
            req.paid_date.clone(),
            req.tally_date.clone(),
            req.remarks.clone(),
        ])?;
    }
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("Exported {} request(s) to {path}", classified.len());
    }
    Ok(())
}
