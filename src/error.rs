use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Company data not found for '{0}'")]
    CompanyNotFound(String),

    #[error("Invoice '{0}' not found")]
    InvoiceNotFound(String),

    #[error("Invoice number '{number}' already exists for company '{company}'")]
    DuplicateInvoiceNumber { company: String, number: String },

    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid base64 PDF payload: {0}")]
    DecodeFailure(#[from] base64::DecodeError),

    #[error("Failed to parse settings file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Settings directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid item format '{0}'. Expected 'description:amount' (e.g., 'Consulting:1500')")]
    InvalidItemFormat(String),

    #[error("Invalid amount '{amount}' for item '{item}': must be a number")]
    InvalidAmount { item: String, amount: String },

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvoiceError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InvoiceError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
