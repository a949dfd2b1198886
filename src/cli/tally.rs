use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::{classify_snapshot, split_tally};
use crate::cli::{authenticate, colored_status, ledger_client, timestamp_now};
use crate::error::{FmsError, Result};
use crate::fmt::money;
use crate::settings::load_settings;

pub fn list(user: Option<&str>, history: bool) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    let session = authenticate(&settings, &client, user)?;
    session.require_admin("tally entry")?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let (pending, processed) = split_tally(classify_snapshot(&snapshot));

    let (title, rows) = if history {
        ("Tally History", processed)
    } else {
        ("Pending Tally Entries", pending)
    };
    if rows.is_empty() {
        println!("{title}: nothing to show.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Row", "Status", "Unique No", "Pay To", "Approved Amount", "Type", "Paid On", "Remarks",
    ]);
    for req in &rows {
        let status = if history { "Tally Processed" } else { "Paid" };
        table.add_row(vec![
            Cell::new(req.row),
            Cell::new(colored_status(status)),
            Cell::new(&req.unique_no),
            Cell::new(&req.pay_to),
            Cell::new(money(req.effective_amount())),
            Cell::new(if req.payment_type.is_empty() { "-" } else { &req.payment_type }),
            Cell::new(if req.paid_date.is_empty() { "-" } else { &req.paid_date }),
            Cell::new(if req.remarks.is_empty() { "-" } else { &req.remarks }),
        ]);
    }
    println!("{title}\n{table}");
    Ok(())
}

pub fn post(user: Option<&str>, rows: Vec<u32>, all: bool) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    let session = authenticate(&settings, &client, user)?;
    session.require_admin("tally entry")?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let (pending, _) = split_tally(classify_snapshot(&snapshot));

    let selected: Vec<u32> = if all {
        pending.iter().map(|r| r.row).collect()
    } else {
        if rows.is_empty() {
            return Err(FmsError::Validation(
                "no rows selected; pass row numbers or --all".to_string(),
            ));
        }
        for row in &rows {
            if !pending.iter().any(|r| r.row == *row) {
                return Err(FmsError::Validation(format!(
                    "row {row} is not awaiting tally entry"
                )));
            }
        }
        rows
    };
    if selected.is_empty() {
        println!("Nothing awaiting tally entry.");
        return Ok(());
    }

    let stamp = timestamp_now();
    let posted = post_batch(&selected, |row| {
        client.update_tally_entry(&settings.sheet_name, row, &stamp)
    })?;

    println!(
        "{} {posted} entr{} recorded in the tally ledger",
        "Posted.".green().bold(),
        if posted == 1 { "y" } else { "ies" },
    );
    Ok(())
}

/// Update the selected rows one at a time, in order. The loop is
/// intentionally serial: row-number addressing stays stable and the batch
/// can abort early. The first failure stops everything and names the row;
/// rows updated before it remain updated remotely.
fn post_batch<F>(rows: &[u32], mut update: F) -> Result<usize>
where
    F: FnMut(u32) -> Result<()>,
{
    for (updated, row) in rows.iter().enumerate() {
        if let Err(e) = update(*row) {
            return Err(FmsError::TallyBatch {
                row: *row,
                reason: e.to_string(),
                updated,
            });
        }
    }
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_batch_updates_all_rows_in_order() {
        let mut seen = Vec::new();
        let posted = post_batch(&[7, 9, 12], |row| {
            seen.push(row);
            Ok(())
        })
        .unwrap();
        assert_eq!(posted, 3);
        assert_eq!(seen, vec![7, 9, 12]);
    }

    #[test]
    fn test_post_batch_aborts_on_first_failure() {
        let mut seen = Vec::new();
        let err = post_batch(&[7, 9, 12], |row| {
            seen.push(row);
            if row == 9 {
                Err(FmsError::Remote("row locked".to_string()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        // Row 7 was updated before the failure; row 12 was never attempted.
        assert_eq!(seen, vec![7, 9]);
        match err {
            FmsError::TallyBatch { row, updated, .. } => {
                assert_eq!(row, 9);
                assert_eq!(updated, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_post_batch_error_names_failing_row() {
        let err = post_batch(&[4], |_| Err(FmsError::Remote("boom".to_string()))).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 4"), "message was: {msg}");
        assert!(msg.contains("boom"));
    }
}
