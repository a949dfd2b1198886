use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::classify_snapshot;
use crate::cli::{authenticate, ledger_client};
use crate::error::Result;
use crate::fmt::money;
use crate::reports::{dashboard_stats, status_distribution, weekday_trend, WEEKDAYS};
use crate::settings::load_settings;

pub fn run(user: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let client = ledger_client(&settings)?;
    authenticate(&settings, &client, user)?;

    let snapshot = client.fetch_sheet(&settings.sheet_name)?;
    let classified = classify_snapshot(&snapshot);

    let stats = dashboard_stats(&classified);
    println!("{}", "Dashboard".bold());
    println!();
    println!("Total requests:     {}", stats.total_requests);
    println!("Pending approvals:  {}", stats.pending_approvals);
    println!("Payments made:      {}", stats.payments_made);
    println!("Total paid:         {}", money(stats.paid_total));

    let trend = weekday_trend(&classified);
    let mut table = Table::new();
    table.set_header(vec!["Day", "Approved", "Pending", "Rejected"]);
    for (day, bucket) in WEEKDAYS.iter().zip(trend.iter()) {
        table.add_row(vec![
            Cell::new(day),
            Cell::new(money(bucket.approved)),
            Cell::new(money(bucket.pending)),
            Cell::new(money(bucket.rejected)),
        ]);
    }
    println!("\nWeekday Trend\n{table}");

    let mut dist = Table::new();
    dist.set_header(vec!["Status", "Count", "%"]);
    for slice in status_distribution(&classified) {
        dist.add_row(vec![
            Cell::new(slice.label),
            Cell::new(slice.count),
            Cell::new(format!("{}%", slice.pct)),
        ]);
    }
    println!("\nStatus Distribution\n{dist}");
    Ok(())
}
