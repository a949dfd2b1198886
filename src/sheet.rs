use crate::fmt::parse_amount;

/// Physical rows reserved at the top of the sheet. Every consumer skips them.
pub const HEADER_ROWS: usize = 6;

/// The fixed column layout of the FMS sheet. Column index is the contract;
/// this module is the only place that knows the positions.
pub mod col {
    pub const TIMESTAMP: usize = 0;
    pub const SEQ_NO: usize = 1;
    pub const APPROVAL_STATUS: usize = 2;
    pub const UNIQUE_NO: usize = 3;
    pub const UNIT: usize = 4;
    pub const PAY_TO: usize = 5;
    pub const AMOUNT: usize = 6;
    pub const REMARKS: usize = 7;
    pub const ATTACHMENT_URL: usize = 8;
    pub const APPROVED_AMOUNT: usize = 9;
    pub const APPROVAL_REMARKS: usize = 10;
    pub const PLANNED_DATE: usize = 11;
    pub const PAID_DATE: usize = 12;
    pub const PAYMENT_STATUS: usize = 13;
    pub const PAYMENT_TYPE: usize = 14;
    pub const PROOF_URL: usize = 15;
    pub const TALLY_DATE: usize = 16;

    pub const COUNT: usize = 17;
}

/// Shortest row a view will accept; shorter rows are skipped, longer rows may
/// be missing any of the tail columns.
pub const MIN_COLUMNS: usize = col::AMOUNT + 1;

/// Field names accepted by the `updatePayment` remote operation. Only named
/// columns are overwritten; everything else is left untouched.
pub mod field {
    pub const SEQ_NO: &str = "seqNo";
    pub const APPROVAL_STATUS: &str = "approvalStatus";
    pub const APPROVED_AMOUNT: &str = "approvedAmount";
    pub const APPROVAL_REMARKS: &str = "approvalRemarks";
    pub const PLANNED_DATE: &str = "plannedDate";
    pub const PAID_DATE: &str = "paidDate";
    pub const PAYMENT_STATUS: &str = "paymentStatus";
    pub const PAYMENT_TYPE: &str = "paymentType";
    pub const PROOF_URL: &str = "proofUrl";
}

/// One payment request, decoded from a sheet row. `row` is the 1-based
/// physical row number used as the addressing key for updates.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub row: u32,
    pub timestamp: String,
    pub seq_no: String,
    pub approval_status: String,
    pub unique_no: String,
    pub unit: String,
    pub pay_to: String,
    pub amount: f64,
    pub remarks: String,
    pub attachment_url: String,
    pub approved_amount: Option<f64>,
    pub approval_remarks: String,
    pub planned_date: String,
    pub paid_date: String,
    pub payment_status: String,
    pub payment_type: String,
    pub proof_url: String,
    pub tally_date: String,
}

impl PaymentRequest {
    /// The amount downstream views display and reconcile: the approved amount
    /// once one is recorded, the requested amount before that.
    pub fn effective_amount(&self) -> f64 {
        self.approved_amount.unwrap_or(self.amount)
    }
}

fn cell(cells: &[String], idx: usize) -> &str {
    cells.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Decode one raw sheet row. Returns `None` for rows no view should see:
/// short rows and rows whose reference, unit or payee is blank (the header
/// block decodes to `None` the same way).
pub fn decode(row: u32, cells: &[String]) -> Option<PaymentRequest> {
    if cells.len() < MIN_COLUMNS {
        return None;
    }
    let unique_no = cell(cells, col::UNIQUE_NO);
    let unit = cell(cells, col::UNIT);
    let pay_to = cell(cells, col::PAY_TO);
    if unique_no.is_empty() || unit.is_empty() || pay_to.is_empty() {
        return None;
    }

    let approved_raw = cell(cells, col::APPROVED_AMOUNT);
    let approved_amount = if approved_raw.is_empty() {
        None
    } else {
        Some(parse_amount(approved_raw))
    };

    Some(PaymentRequest {
        row,
        timestamp: cell(cells, col::TIMESTAMP).to_string(),
        seq_no: cell(cells, col::SEQ_NO).to_string(),
        approval_status: cell(cells, col::APPROVAL_STATUS).to_string(),
        unique_no: unique_no.to_string(),
        unit: unit.to_string(),
        pay_to: pay_to.to_string(),
        amount: parse_amount(cell(cells, col::AMOUNT)),
        remarks: cell(cells, col::REMARKS).to_string(),
        attachment_url: cell(cells, col::ATTACHMENT_URL).to_string(),
        approved_amount,
        approval_remarks: cell(cells, col::APPROVAL_REMARKS).to_string(),
        planned_date: cell(cells, col::PLANNED_DATE).to_string(),
        paid_date: cell(cells, col::PAID_DATE).to_string(),
        payment_status: cell(cells, col::PAYMENT_STATUS).to_string(),
        payment_type: cell(cells, col::PAYMENT_TYPE).to_string(),
        proof_url: cell(cells, col::PROOF_URL).to_string(),
        tally_date: cell(cells, col::TALLY_DATE).to_string(),
    })
}

/// A request as entered on the request form, before it has a row.
#[derive(Debug, Clone, Default)]
pub struct NewRequest {
    pub unique_no: String,
    pub unit: String,
    pub pay_to: String,
    pub amount: f64,
    pub remarks: String,
    pub attachment_url: String,
    pub planned_date: String,
}

impl NewRequest {
    /// Client-side validation; a failure here means no remote call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.unique_no.trim().is_empty() {
            return Err("unique reference number is required".to_string());
        }
        if self.unit.trim().is_empty() {
            return Err("requesting unit name is required".to_string());
        }
        if self.pay_to.trim().is_empty() {
            return Err("payee is required".to_string());
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("amount must be a finite number greater than zero".to_string());
        }
        Ok(())
    }

    /// Encode a full new row in the fixed column layout. New rows always
    /// start life with approval status "Pending".
    pub fn encode(&self, timestamp: &str) -> Vec<String> {
        let mut row = vec![String::new(); col::COUNT];
        row[col::TIMESTAMP] = timestamp.to_string();
        row[col::APPROVAL_STATUS] = "Pending".to_string();
        row[col::UNIQUE_NO] = self.unique_no.trim().to_string();
        row[col::UNIT] = self.unit.trim().to_string();
        row[col::PAY_TO] = self.pay_to.trim().to_string();
        row[col::AMOUNT] = format!("{}", self.amount);
        row[col::REMARKS] = self.remarks.trim().to_string();
        row[col::ATTACHMENT_URL] = self.attachment_url.clone();
        row[col::PLANNED_DATE] = self.planned_date.clone();
        row
    }
}

/// Payment execution instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentType {
    Cash,
    Bank,
    Upi,
    Other,
}

impl PaymentType {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentType::Cash),
            "bank" => Ok(PaymentType::Bank),
            "upi" => Ok(PaymentType::Upi),
            "other" => Ok(PaymentType::Other),
            other => Err(format!(
                "unknown payment type '{other}' (expected cash, bank, upi or other)"
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Bank => "Bank",
            PaymentType::Upi => "UPI",
            PaymentType::Other => "Other",
        }
    }
}
