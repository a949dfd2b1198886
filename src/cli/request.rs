use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::classify_snapshot;
use crate::cli::{authenticate, colored_status, ledger_client, timestamp_now};
use crate::error::{FmsError, Result};
use crate::fmt::money;
use crate::settings::load_settings;
use crate::sheet::NewRequest;

#[allow(clippy::too_many_arguments)]
pub fn submit(
    user: Option<&str>,
    unique_no: String,
    unit: String,
    pay_to: String,
    amount: f64,
    remarks: Option<String>,
    attach: Option<String>,
    pay_date: Option<String>,
) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;

    let mut new = NewRequest {
        unique_no,
        unit,
        pay_to,
        amount,
        remarks: remarks.unwrap_or_default(),
        planned_date: pay_date.unwrap_or_default(),
        ..NewRequest::default()
    };
    // Validation failures block submission before any remote call.
    new.validate().map_err(FmsError::Validation)?;

    let session = authenticate(&settings, &client, user)?;

    if let Some(path) = attach {
        let url = client.upload_file(Path::new(&path), &settings.upload_folder)?;
        println!("Uploaded attachment: {url}");
        new.attachment_url = url;
    }

    // The append is fire-and-forget: the backend answers opaquely, so the
    // confirmation below is optimistic.
    client.append_row(&settings.sheet_name, &new.encode(&timestamp_now()))?;

    println!(
        "{} Request {} submitted for {} ({}) by {}",
        "Submitted.".green().bold(),
        new.unique_no,
        new.pay_to,
        money(new.amount),
        session.identifier,
    );
    Ok(())
}

pub fn list(user: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    authenticate(&settings, &client, user)?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let classified = classify_snapshot(&snapshot);

    if classified.is_empty() {
        println!("No requests found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Row", "Status", "Unique No", "Unit", "Pay To", "Amount", "Remarks", "Attachment",
    ]);
    for (req, stage) in &classified {
        table.add_row(vec![
            Cell::new(req.row),
            Cell::new(colored_status(stage.label())),
            Cell::new(&req.unique_no),
            Cell::new(&req.unit),
            Cell::new(&req.pay_to),
            Cell::new(money(req.effective_amount())),
            Cell::new(if req.remarks.is_empty() { "-" } else { &req.remarks }),
            Cell::new(if req.attachment_url.is_empty() { "-" } else { &req.attachment_url }),
        ]);
    }
    println!("Submitted Requests\n{table}");
    Ok(())
}
