use thiserror::Error;

#[derive(Error, Debug)]
pub enum FmsError {
    #[error("Could not connect to the ledger endpoint: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed response from the ledger endpoint: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger endpoint reported a failure: {0}")]
    Remote(String),

    #[error("Login failed: {0}")]
    Auth(String),

    #[error("{0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    Denied(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Tally update failed at row {row}: {reason} ({updated} earlier row(s) already updated remotely)")]
    TallyBatch {
        row: u32,
        reason: String,
        updated: usize,
    },

    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for FmsError {
    fn from(e: ureq::Error) -> Self {
        FmsError::Http(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, FmsError>;
