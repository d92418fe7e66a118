use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Static per-company details printed on invoices.
///
/// Persisted as `<company>_info.json`. Every field defaults to empty so that
/// documents written before a field existed still load.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    /// Short display name
    pub name: String,
    /// Legal name printed in the invoice header
    pub company_name: String,
    pub company_address: String,
    pub pan_no: String,
    pub bank_name: String,
    pub account_no: String,
    pub ifsc: String,
    pub email: String,
    /// Custom PDF output directory; empty means the default `<company>/pdf`
    pub pdf_save_path: String,
}

impl CompanyProfile {
    /// Profile created on demand by operations that only know the company key.
    pub fn for_company(key: &str) -> Self {
        Self {
            company_name: key.to_string(),
            ..Self::default()
        }
    }

    pub fn pdf_dir(&self) -> Option<PathBuf> {
        if self.pdf_save_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.pdf_save_path))
        }
    }
}
