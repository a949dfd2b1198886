use crate::sheet::{self, PaymentRequest, HEADER_ROWS};

/// Lifecycle position of a visible row. Stage is a strict function of which
/// of {approval status, payment status, tally date} are populated; it is
/// recomputed from scratch on every fetch. The row itself is the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Approval status blank, "Pending", or anything unrecognized.
    PendingApproval,
    /// Approved, payment not yet executed.
    Approved,
    /// Paid, not yet recorded in the tally.
    Paid,
    /// Tally-processed; nothing further happens to the row.
    TallyProcessed,
    /// Rejected at approval; terminal, excluded from all downstream stages.
    Rejected,
}

pub fn stage_of(req: &PaymentRequest) -> Stage {
    if req.approval_status.eq_ignore_ascii_case("rejected") {
        return Stage::Rejected;
    }
    if !req.approval_status.eq_ignore_ascii_case("approved") {
        // Blank or unrecognized approval status is pending, never an error.
        return Stage::PendingApproval;
    }
    if !req.payment_status.eq_ignore_ascii_case("paid") {
        return Stage::Approved;
    }
    if req.tally_date.is_empty() {
        return Stage::Paid;
    }
    Stage::TallyProcessed
}

/// Classify one raw row. `None` means the row is invisible to every view:
/// blank, short, or part of the header block.
pub fn classify(row: u32, cells: &[String]) -> Option<(PaymentRequest, Stage)> {
    let req = sheet::decode(row, cells)?;
    let stage = stage_of(&req);
    Some((req, stage))
}

/// Classify a full-sheet snapshot, skipping the fixed header block. Row
/// numbers are 1-based physical positions, the addressing key for updates.
pub fn classify_snapshot(rows: &[Vec<String>]) -> Vec<(PaymentRequest, Stage)> {
    rows.iter()
        .enumerate()
        .skip(HEADER_ROWS)
        .filter_map(|(idx, cells)| classify(idx as u32 + 1, cells))
        .collect()
}

/// Tally pending queue membership: paid, with a payment date recorded, and
/// not yet tally-processed.
pub fn is_tally_eligible(req: &PaymentRequest, stage: Stage) -> bool {
    stage == Stage::Paid && !req.paid_date.is_empty()
}

/// Pending/history split for the payment-approval view. Rejected rows stay
/// in the approval history; they never reach any later view.
pub fn split_approval(
    classified: Vec<(PaymentRequest, Stage)>,
) -> (Vec<PaymentRequest>, Vec<PaymentRequest>) {
    let mut pending = Vec::new();
    let mut history = Vec::new();
    for (req, stage) in classified {
        match stage {
            Stage::PendingApproval => pending.push(req),
            _ => history.push(req),
        }
    }
    (pending, history)
}

/// Pending/history split for the make-payment view. Only approved rows are
/// eligible; rejected rows appear in neither list.
pub fn split_payment(
    classified: Vec<(PaymentRequest, Stage)>,
) -> (Vec<PaymentRequest>, Vec<PaymentRequest>) {
    let mut pending = Vec::new();
    let mut history = Vec::new();
    for (req, stage) in classified {
        match stage {
            Stage::Approved => pending.push(req),
            Stage::Paid | Stage::TallyProcessed => history.push(req),
            Stage::PendingApproval | Stage::Rejected => {}
        }
    }
    (pending, history)
}

/// Pending/history split for the tally-entry view.
pub fn split_tally(
    classified: Vec<(PaymentRequest, Stage)>,
) -> (Vec<PaymentRequest>, Vec<PaymentRequest>) {
    let mut pending = Vec::new();
    let mut history = Vec::new();
    for (req, stage) in classified {
        if is_tally_eligible(&req, stage) {
            pending.push(req);
        } else if stage == Stage::TallyProcessed {
            history.push(req);
        }
    }
    (pending, history)
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::PendingApproval => "Pending",
            Stage::Approved => "Approved",
            Stage::Paid => "Paid",
            Stage::TallyProcessed => "Tally Processed",
            Stage::Rejected => "Rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::col;

    fn cells(approval: &str, payment: &str, tally: &str) -> Vec<String> {
        let mut c = vec![String::new(); col::COUNT];
        c[col::TIMESTAMP] = "2026-03-02 09:15:00".to_string();
        c[col::APPROVAL_STATUS] = approval.to_string();
        c[col::UNIQUE_NO] = "REQ-001".to_string();
        c[col::UNIT] = "Finance Division".to_string();
        c[col::PAY_TO] = "Vendor A".to_string();
        c[col::AMOUNT] = "50000".to_string();
        c[col::PAYMENT_STATUS] = payment.to_string();
        c[col::TALLY_DATE] = tally.to_string();
        if payment.eq_ignore_ascii_case("paid") {
            c[col::PAID_DATE] = "2026-03-05".to_string();
        }
        c
    }

    #[test]
    fn test_blank_and_unrecognized_statuses_are_pending() {
        for status in ["", "Pending", "pending", "On Hold", "???"] {
            let (_, stage) = classify(7, &cells(status, "", "")).unwrap();
            assert_eq!(stage, Stage::PendingApproval, "status {status:?}");
        }
    }

    #[test]
    fn test_pending_rows_never_reach_payment_or_tally() {
        let classified = classify_snapshot(&snapshot(&[
            cells("", "", ""),
            cells("Pending", "", ""),
        ]));
        let (pay_pending, pay_history) = split_payment(classified.clone());
        assert!(pay_pending.is_empty());
        assert!(pay_history.is_empty());
        let (tally_pending, tally_history) = split_tally(classified);
        assert!(tally_pending.is_empty());
        assert!(tally_history.is_empty());
    }

    #[test]
    fn test_rejected_is_terminal_and_invisible_downstream() {
        let classified = classify_snapshot(&snapshot(&[cells("Rejected", "", "")]));
        assert_eq!(classified[0].1, Stage::Rejected);

        let (pending, history) = split_approval(classified.clone());
        assert!(pending.is_empty());
        assert_eq!(history.len(), 1);

        let (pending, history) = split_payment(classified.clone());
        assert!(pending.is_empty() && history.is_empty());
        let (pending, history) = split_tally(classified);
        assert!(pending.is_empty() && history.is_empty());
    }

    #[test]
    fn test_approved_unpaid_is_payment_pending_not_history() {
        let classified = classify_snapshot(&snapshot(&[cells("Approved", "", "")]));
        assert_eq!(classified[0].1, Stage::Approved);
        let (pending, history) = split_payment(classified);
        assert_eq!(pending.len(), 1);
        assert!(history.is_empty());
    }

    #[test]
    fn test_paid_row_awaits_tally() {
        let classified = classify_snapshot(&snapshot(&[cells("Approved", "Paid", "")]));
        assert_eq!(classified[0].1, Stage::Paid);
        let (pending, _) = split_tally(classified.clone());
        assert_eq!(pending.len(), 1);
        // Same row shows as history in the payment view
        let (_, history) = split_payment(classified);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_tally_processed_only_in_tally_history() {
        let classified =
            classify_snapshot(&snapshot(&[cells("Approved", "Paid", "2026-03-06 11:00:00")]));
        assert_eq!(classified[0].1, Stage::TallyProcessed);
        let (pending, history) = split_tally(classified.clone());
        assert!(pending.is_empty());
        assert_eq!(history.len(), 1);
        let (approval_pending, _) = split_approval(classified.clone());
        assert!(approval_pending.is_empty());
        let (pay_pending, _) = split_payment(classified);
        assert!(pay_pending.is_empty());
    }

    #[test]
    fn test_tally_date_presence_is_the_only_signal() {
        // Content of the tally cell is never inspected beyond existence.
        let classified = classify_snapshot(&snapshot(&[cells("Approved", "Paid", "x")]));
        assert_eq!(classified[0].1, Stage::TallyProcessed);
    }

    #[test]
    fn test_paid_without_payment_date_is_not_tally_eligible() {
        let mut c = cells("Approved", "Paid", "");
        c[col::PAID_DATE] = String::new();
        let classified = classify_snapshot(&snapshot(&[c]));
        assert_eq!(classified[0].1, Stage::Paid);
        let (pending, _) = split_tally(classified);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let c = cells("Approved", "Paid", "");
        let first = classify(7, &c).unwrap();
        let second = classify(7, &c).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_header_block_is_skipped() {
        // Header rows carry text in every column but must not classify.
        let header = vec!["h".to_string(); col::COUNT];
        let mut rows = vec![header; HEADER_ROWS];
        rows.push(cells("Pending", "", ""));
        let classified = classify_snapshot(&rows);
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].0.row, HEADER_ROWS as u32 + 1);
    }

    fn snapshot(data_rows: &[Vec<String>]) -> Vec<Vec<String>> {
        let mut rows = vec![vec![String::new(); col::COUNT]; HEADER_ROWS];
        rows.extend_from_slice(data_rows);
        rows
    }
}
