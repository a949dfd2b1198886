use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::classifier::Stage;
use crate::sheet::PaymentRequest;

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq)]
pub struct DashboardStats {
    /// All visible (non-blank) rows.
    pub total_requests: usize,
    /// Rows not yet in a terminal approval state.
    pub pending_approvals: usize,
    /// Rows with payment status Paid, tally-processed included.
    pub payments_made: usize,
    /// Sum of effective amounts over paid rows.
    pub paid_total: f64,
}

pub fn dashboard_stats(classified: &[(PaymentRequest, Stage)]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_requests: classified.len(),
        ..DashboardStats::default()
    };
    for (req, stage) in classified {
        match stage {
            Stage::PendingApproval => stats.pending_approvals += 1,
            Stage::Paid | Stage::TallyProcessed => {
                stats.payments_made += 1;
                stats.paid_total += req.effective_amount();
            }
            Stage::Approved | Stage::Rejected => {}
        }
    }
    stats
}

// ---------------------------------------------------------------------------
// Weekday trend
// ---------------------------------------------------------------------------

/// Amounts bucketed by submission weekday, split by approval outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrendBucket {
    pub approved: f64,
    pub pending: f64,
    pub rejected: f64,
}

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Rows whose timestamp does not parse are left out of the trend; they still
/// count everywhere else.
pub fn weekday_trend(classified: &[(PaymentRequest, Stage)]) -> [TrendBucket; 7] {
    let mut buckets = [TrendBucket::default(); 7];
    for (req, stage) in classified {
        let Some(weekday) = parse_weekday(&req.timestamp) else {
            continue;
        };
        let bucket = &mut buckets[weekday];
        let amount = req.effective_amount();
        match stage {
            Stage::PendingApproval => bucket.pending += amount,
            Stage::Rejected => bucket.rejected += amount,
            Stage::Approved | Stage::Paid | Stage::TallyProcessed => bucket.approved += amount,
        }
    }
    buckets
}

fn parse_weekday(timestamp: &str) -> Option<usize> {
    let date = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(timestamp, "%Y-%m-%d"))
        .ok()?;
    Some(date.weekday().num_days_from_monday() as usize)
}

// ---------------------------------------------------------------------------
// Status distribution
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct StatusSlice {
    pub label: &'static str,
    pub count: usize,
    /// Rounded independently per bucket; the slices are not guaranteed to
    /// sum to exactly 100.
    pub pct: u32,
}

pub fn status_distribution(classified: &[(PaymentRequest, Stage)]) -> Vec<StatusSlice> {
    let total = classified.len();
    let count_of = |want: fn(Stage) -> bool| classified.iter().filter(|(_, s)| want(*s)).count();

    let buckets: [(&'static str, usize); 4] = [
        ("Pending", count_of(|s| s == Stage::PendingApproval)),
        ("Approved", count_of(|s| s == Stage::Approved)),
        (
            "Paid",
            count_of(|s| matches!(s, Stage::Paid | Stage::TallyProcessed)),
        ),
        ("Rejected", count_of(|s| s == Stage::Rejected)),
    ];

    buckets
        .iter()
        .map(|&(label, count)| StatusSlice {
            label,
            count,
            pct: if total == 0 {
                0
            } else {
                (count as f64 / total as f64 * 100.0).round() as u32
            },
        })
        .collect()
}
