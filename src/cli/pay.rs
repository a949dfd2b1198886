use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::{classify_snapshot, split_payment};
use crate::cli::{authenticate, colored_status, date_today, ledger_client};
use crate::error::{FmsError, Result};
use crate::fmt::money;
use crate::settings::load_settings;
use crate::sheet::{field, PaymentType};

pub fn list(user: Option<&str>, history: bool) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    let session = authenticate(&settings, &client, user)?;
    session.require_admin("make payment")?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let (pending, paid) = split_payment(classify_snapshot(&snapshot));

    let (title, rows) = if history {
        ("Payment History", paid)
    } else {
        ("Pending Payments", pending)
    };
    if rows.is_empty() {
        println!("{title}: nothing to show.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Row", "Status", "Unique No", "Unit", "Pay To", "Approved Amount", "Type", "Remarks",
    ]);
    for req in &rows {
        let status = if history { "Paid" } else { "Approved" };
        table.add_row(vec![
            Cell::new(req.row),
            Cell::new(colored_status(status)),
            Cell::new(&req.unique_no),
            Cell::new(&req.unit),
            Cell::new(&req.pay_to),
            Cell::new(money(req.effective_amount())),
            Cell::new(if req.payment_type.is_empty() { "-" } else { &req.payment_type }),
            Cell::new(if req.remarks.is_empty() { "-" } else { &req.remarks }),
        ]);
    }
    println!("{title}\n{table}");
    Ok(())
}

pub fn execute(
    user: Option<&str>,
    row: u32,
    payment_type: &str,
    proof: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let payment_type = PaymentType::parse(payment_type).map_err(FmsError::Validation)?;

    let settings = load_settings();
    let client = ledger_client(&settings)?;
    let session = authenticate(&settings, &client, user)?;
    session.require_admin("make payment")?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let (pending, _) = split_payment(classify_snapshot(&snapshot));
    let req = pending
        .iter()
        .find(|r| r.row == row)
        .ok_or_else(|| FmsError::Validation(format!("row {row} is not awaiting payment")))?;

    // Proof upload is best-effort: on failure the operator is warned and the
    // payment proceeds without proof.
    let proof_url = match proof {
        Some(path) => match client.upload_file(Path::new(&path), &settings.upload_folder) {
            Ok(url) => {
                println!("Uploaded proof: {url}");
                url
            }
            Err(e) => {
                eprintln!("{} proof upload failed: {e}; paying without proof", "Warning:".yellow());
                String::new()
            }
        },
        None => String::new(),
    };

    let paid_date = date.unwrap_or_else(date_today);
    let mut fields: Vec<(&str, String)> = vec![
        (field::PAYMENT_STATUS, "Paid".to_string()),
        (field::PAYMENT_TYPE, payment_type.label().to_string()),
        (field::PAID_DATE, paid_date.clone()),
    ];
    if !proof_url.is_empty() {
        fields.push((field::PROOF_URL, proof_url));
    }
    if req.planned_date.is_empty() {
        fields.push((field::PLANNED_DATE, paid_date));
    }

    client.update_payment(&settings.sheet_name, row, &fields)?;

    println!(
        "{} {} paid {} to {} by {} (row {row} moved to history)",
        "Paid.".blue().bold(),
        req.unique_no,
        money(req.effective_amount()),
        req.pay_to,
        payment_type.label(),
    );
    Ok(())
}
