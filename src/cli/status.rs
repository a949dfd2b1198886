use crate::classifier::{classify_snapshot, Stage};
use crate::cli::ledger_client;
use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();

    println!("Endpoint:   {}", if settings.endpoint_url.is_empty() { "(not set)" } else { &settings.endpoint_url });
    println!("Sheet:      {}", settings.sheet_name);
    println!("Folder:     {}", if settings.upload_folder.is_empty() { "(not set)" } else { &settings.upload_folder });
    println!("Identity:   {}", if settings.identifier.is_empty() { "(not set)" } else { &settings.identifier });

    if settings.endpoint_url.is_empty() {
        println!();
        println!("No endpoint configured. Run `fmsdesk init` to set up.");
        return Ok(());
    }

    let client = ledger_client(&settings)?;
    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let classified = classify_snapshot(&snapshot);

    let count = |stage: Stage| classified.iter().filter(|(_, s)| *s == stage).count();

    println!();
    println!("Requests:           {}", classified.len());
    println!("Pending approval:   {}", count(Stage::PendingApproval));
    println!("Awaiting payment:   {}", count(Stage::Approved));
    println!("Awaiting tally:     {}", count(Stage::Paid));
    println!("Tally processed:    {}", count(Stage::TallyProcessed));
    println!("Rejected:           {}", count(Stage::Rejected));

    Ok(())
}
