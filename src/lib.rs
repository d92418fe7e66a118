pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod pdf;
pub mod store;

pub use config::{CompanyProfile, Settings};
pub use error::{InvoiceError, Result};
pub use ledger::{Invoice, InvoiceInput, InvoiceLedger, InvoiceSummary, Item};
pub use store::{CompanyStore, LoadReport, LoadWarning};
