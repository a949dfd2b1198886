pub mod approve;
pub mod dashboard;
pub mod export;
pub mod init;
pub mod pay;
pub mod request;
pub mod status;
pub mod tally;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::client::LedgerClient;
use crate::error::{FmsError, Result};
use crate::session::{self, Session};
use crate::settings::{require_endpoint, Settings};

#[derive(Parser)]
#[command(
    name = "fmsdesk",
    about = "Payment-request workflow CLI for hospital finance teams."
)]
pub struct Cli {
    /// Login identifier (overrides the one in settings)
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up fmsdesk: ledger endpoint, sheet name, upload folder, identity.
    Init {
        /// URL of the remote scripting endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Sheet name used as the system of record (default: FMS)
        #[arg(long)]
        sheet: Option<String>,
        /// Destination folder identifier for file uploads
        #[arg(long)]
        folder: Option<String>,
        /// Login identifier
        #[arg(long)]
        identifier: Option<String>,
    },
    /// Show current settings and per-stage request counts.
    Status,
    /// Submit and list payment requests.
    Request {
        #[command(subcommand)]
        command: RequestCommands,
    },
    /// Approve or reject pending requests (admin).
    Approve {
        #[command(subcommand)]
        command: ApproveCommands,
    },
    /// Execute payments for approved requests (admin).
    Pay {
        #[command(subcommand)]
        command: PayCommands,
    },
    /// Record paid requests in the tally ledger (admin).
    Tally {
        #[command(subcommand)]
        command: TallyCommands,
    },
    /// Summary statistics and trends over the full sheet.
    Dashboard,
    /// Export the classified snapshot to CSV.
    Export {
        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// Submit a new payment request.
    Submit {
        /// Unique reference number (not checked for duplicates)
        #[arg(long = "unique-no")]
        unique_no: String,
        /// Requesting unit name
        #[arg(long)]
        unit: String,
        /// Payee
        #[arg(long = "pay-to")]
        pay_to: String,
        /// Requested amount
        #[arg(long)]
        amount: f64,
        /// Free-text remarks
        #[arg(long)]
        remarks: Option<String>,
        /// Path of a file to upload and attach
        #[arg(long)]
        attach: Option<String>,
        /// Planned payment date: YYYY-MM-DD
        #[arg(long = "pay-date")]
        pay_date: Option<String>,
    },
    /// List submitted requests with their lifecycle stage.
    List,
}

#[derive(Subcommand)]
pub enum ApproveCommands {
    /// List the pending-approval queue, or decided rows with --history.
    List {
        #[arg(long)]
        history: bool,
    },
    /// Approve a request by row number.
    Grant {
        /// Row number (shown in `fmsdesk approve list`)
        row: u32,
        /// Approved amount (default: the requested amount)
        #[arg(long)]
        amount: Option<f64>,
        /// Approval remarks
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Reject a request by row number. Rejection is terminal.
    Reject {
        /// Row number (shown in `fmsdesk approve list`)
        row: u32,
        /// Approval remarks
        #[arg(long)]
        remarks: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PayCommands {
    /// List approved requests awaiting payment, or paid rows with --history.
    List {
        #[arg(long)]
        history: bool,
    },
    /// Execute a payment by row number.
    Execute {
        /// Row number (shown in `fmsdesk pay list`)
        row: u32,
        /// Payment type: cash, bank, upi, other
        #[arg(long = "type")]
        payment_type: String,
        /// Path of a payment-proof file to upload
        #[arg(long)]
        proof: Option<String>,
        /// Actual payment date (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TallyCommands {
    /// List paid requests awaiting tally, or processed rows with --history.
    List {
        #[arg(long)]
        history: bool,
    },
    /// Mark paid requests as recorded in the tally ledger.
    Post {
        /// Row numbers (shown in `fmsdesk tally list`)
        rows: Vec<u32>,
        /// Post every eligible row instead of naming rows
        #[arg(long, conflicts_with = "rows")]
        all: bool,
    },
}

/// Resolve the login identifier, obtain the secret, and run the credential
/// check. The resulting session is handed to the view explicitly; nothing is
/// cached across invocations.
pub(crate) fn authenticate(
    settings: &Settings,
    client: &LedgerClient,
    user_override: Option<&str>,
) -> Result<Session> {
    let identifier = match user_override {
        Some(u) => u.to_string(),
        None => settings.identifier.clone(),
    };
    if identifier.is_empty() {
        return Err(FmsError::Auth(
            "no login identifier; pass --user or run `fmsdesk init`".to_string(),
        ));
    }
    let secret = match std::env::var("FMSDESK_SECRET") {
        Ok(s) if !s.is_empty() => s,
        _ => rpassword::prompt_password(format!("Password for {identifier}: "))
            .map_err(FmsError::Io)?,
    };
    session::login(client, &identifier, &secret)
}

/// Build the ledger client from settings, or explain how to configure one.
pub(crate) fn ledger_client(settings: &Settings) -> Result<LedgerClient> {
    Ok(LedgerClient::new(require_endpoint(settings)?))
}

pub(crate) fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn date_today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Status text colored the way every view renders it.
pub(crate) fn colored_status(label: &str) -> colored::ColoredString {
    match label {
        "Pending" => label.yellow(),
        "Approved" => label.green(),
        "Rejected" => label.red(),
        "Paid" | "Tally Processed" => label.blue(),
        _ => label.normal(),
    }
}
