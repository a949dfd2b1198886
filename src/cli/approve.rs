use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::{classify_snapshot, split_approval};
use crate::cli::{authenticate, colored_status, date_today, ledger_client};
use crate::error::{FmsError, Result};
use crate::fmt::money;
use crate::settings::load_settings;
use crate::sheet::{field, PaymentRequest};

pub fn list(user: Option<&str>, history: bool) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    let session = authenticate(&settings, &client, user)?;
    session.require_admin("payment approval")?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let (pending, decided) = split_approval(classify_snapshot(&snapshot));

    let (title, rows) = if history {
        ("Approval History", decided)
    } else {
        ("Pending Approvals", pending)
    };
    if rows.is_empty() {
        println!("{title}: nothing to show.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Row", "Status", "Unique No", "Unit", "Pay To", "Requested", "Approved", "Remarks",
    ]);
    for req in &rows {
        table.add_row(vec![
            Cell::new(req.row),
            Cell::new(colored_status(display_status(req))),
            Cell::new(&req.unique_no),
            Cell::new(&req.unit),
            Cell::new(&req.pay_to),
            Cell::new(money(req.amount)),
            Cell::new(match req.approved_amount {
                Some(a) => money(a),
                None => "-".to_string(),
            }),
            Cell::new(if req.remarks.is_empty() { "-" } else { &req.remarks }),
        ]);
    }
    println!("{title}\n{table}");
    Ok(())
}

fn display_status(req: &PaymentRequest) -> &str {
    if req.approval_status.is_empty() {
        "Pending"
    } else {
        &req.approval_status
    }
}

pub fn decide(
    user: Option<&str>,
    row: u32,
    approve: bool,
    amount: Option<f64>,
    remarks: Option<String>,
) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    let session = authenticate(&settings, &client, user)?;
    session.require_admin("payment approval")?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let classified = classify_snapshot(&snapshot);
    let (pending, _) = split_approval(classified.clone());
    let req = pending
        .iter()
        .find(|r| r.row == row)
        .ok_or_else(|| FmsError::Validation(format!("row {row} is not awaiting approval")))?;

    let fields = approval_fields(
        req,
        approve,
        amount,
        remarks,
        next_seq_no(&classified),
        &date_today(),
    );
    client.update_payment(&settings.sheet_name, row, &fields)?;

    // The row moves from the pending list to history without a re-fetch.
    if approve {
        println!(
            "{} {} approved for {} (row {row} moved to history)",
            "Approved.".green().bold(),
            req.unique_no,
            money(amount.unwrap_or(req.amount)),
        );
    } else {
        println!(
            "{} {} rejected (row {row} moved to history)",
            "Rejected.".red().bold(),
            req.unique_no,
        );
    }
    Ok(())
}

/// The sparse column writes for an approval decision. Approval assigns the
/// payment sequence number and stamps today's date as the planned payment
/// date unless the requester already set one; the sheet has no dedicated
/// approval-timestamp column. Rejection writes only the status and remarks.
fn approval_fields(
    req: &PaymentRequest,
    approve: bool,
    amount: Option<f64>,
    remarks: Option<String>,
    seq_no: u32,
    today: &str,
) -> Vec<(&'static str, String)> {
    let mut fields: Vec<(&'static str, String)> = Vec::new();
    if approve {
        let approved = amount.unwrap_or(req.amount);
        fields.push((field::APPROVAL_STATUS, "Approved".to_string()));
        fields.push((field::APPROVED_AMOUNT, format!("{approved}")));
        fields.push((field::SEQ_NO, seq_no.to_string()));
        if req.planned_date.is_empty() {
            fields.push((field::PLANNED_DATE, today.to_string()));
        }
    } else {
        fields.push((field::APPROVAL_STATUS, "Rejected".to_string()));
    }
    if let Some(r) = remarks {
        fields.push((field::APPROVAL_REMARKS, r));
    }
    fields
}

/// Payment sequence numbers are assigned at approval time, one past the
/// highest already on the sheet.
fn next_seq_no(classified: &[(PaymentRequest, crate::classifier::Stage)]) -> u32 {
    classified
        .iter()
        .filter_map(|(req, _)| req.seq_no.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}
