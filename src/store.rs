use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::CompanyProfile;
use crate::error::{InvoiceError, Result};
use crate::ledger::Invoice;

/// Lower-cased key selecting a company's ledger, profile and directory.
pub fn company_key(company: &str) -> String {
    company.to_lowercase()
}

/// A document that existed but could not be used during a load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    Corrupt { path: PathBuf, reason: String },
    Unreadable { path: PathBuf, reason: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::Corrupt { path, reason } => {
                write!(f, "ignored corrupt {}: {}", path.display(), reason)
            }
            LoadWarning::Unreadable { path, reason } => {
                write!(f, "could not read {}: {}", path.display(), reason)
            }
        }
    }
}

/// Outcome of loading one or more companies. A load with warnings is partial:
/// the affected documents were skipped and the company behaves as if they did
/// not exist.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub(crate) fn extend(&mut self, other: LoadReport) {
        self.warnings.extend(other.warnings);
    }
}

/// Documents loaded for one company. `None` means the document was absent or
/// unusable.
#[derive(Debug, Default)]
pub struct CompanyRecord {
    pub invoices: Option<Vec<Invoice>>,
    pub profile: Option<CompanyProfile>,
    pub report: LoadReport,
}

/// JSON documents on disk, one directory per company:
///
/// ```text
/// <base>/<company>/<company>_invoices.json
/// <base>/<company>/<company>_info.json
/// ```
#[derive(Debug, Clone)]
pub struct CompanyStore {
    base_dir: PathBuf,
}

impl CompanyStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn company_dir(&self, company: &str) -> PathBuf {
        self.base_dir.join(company_key(company))
    }

    pub fn invoices_path(&self, company: &str) -> PathBuf {
        self.document_path(company, "invoices")
    }

    pub fn info_path(&self, company: &str) -> PathBuf {
        self.document_path(company, "info")
    }

    pub fn export_path(&self, company: &str) -> PathBuf {
        self.company_dir(company).join("invoices_export.csv")
    }

    pub fn default_pdf_dir(&self, company: &str) -> PathBuf {
        self.company_dir(company).join("pdf")
    }

    fn document_path(&self, company: &str, kind: &str) -> PathBuf {
        let key = company_key(company);
        self.base_dir.join(&key).join(format!("{key}_{kind}.json"))
    }

    /// Create the company directory (and parents) if absent.
    pub fn ensure_directory(&self, company: &str) -> Result<PathBuf> {
        let dir = self.company_dir(company);
        fs::create_dir_all(&dir).map_err(|e| InvoiceError::storage(&dir, e))?;
        Ok(dir)
    }

    /// Company keys that have a directory under the base directory, sorted.
    pub fn discover(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(InvoiceError::storage(&self.base_dir, e)),
        };

        let mut companies = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| InvoiceError::storage(&self.base_dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                companies.push(company_key(name));
            }
        }
        companies.sort();
        companies.dedup();
        Ok(companies)
    }

    /// Load both documents for a company.
    ///
    /// Missing files are not an error. Files that cannot be read or parsed are
    /// skipped and reported in [`CompanyRecord::report`].
    pub fn load(&self, company: &str) -> Result<CompanyRecord> {
        self.ensure_directory(company)?;
        let key = company_key(company);
        let mut report = LoadReport::default();

        let invoices = read_document::<Option<Vec<Invoice>>>(&self.invoices_path(&key), &mut report)
            .map(|invoices| {
                let mut invoices = invoices.unwrap_or_default();
                for invoice in invoices.iter_mut().filter(|i| i.company_name.is_empty()) {
                    invoice.company_name = key.clone();
                }
                invoices
            });
        let profile = read_document::<CompanyProfile>(&self.info_path(&key), &mut report);

        debug!(
            company = %key,
            invoices = invoices.as_ref().map_or(0, Vec::len),
            profile = profile.is_some(),
            "loaded company documents"
        );

        Ok(CompanyRecord {
            invoices,
            profile,
            report,
        })
    }

    /// Overwrite the company's documents with the given contents. A `None`
    /// document is left untouched on disk.
    pub fn save(
        &self,
        company: &str,
        invoices: Option<&[Invoice]>,
        profile: Option<&CompanyProfile>,
    ) -> Result<()> {
        self.ensure_directory(company)?;

        if let Some(invoices) = invoices {
            write_document(&self.invoices_path(company), invoices, "invoices")?;
        }
        if let Some(profile) = profile {
            write_document(&self.info_path(company), profile, "company profile")?;
        }

        debug!(company = %company_key(company), "saved company documents");
        Ok(())
    }
}

fn read_document<T: DeserializeOwned>(path: &Path, report: &mut LoadReport) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable document");
            report.warnings.push(LoadWarning::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping corrupt document");
            report.warnings.push(LoadWarning::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            None
        }
    }
}

fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|source| InvoiceError::Serialize { what, source })?;
    fs::write(path, content).map_err(|e| InvoiceError::storage(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Item;
    use chrono::{DateTime, NaiveDate};
    use tempfile::TempDir;

    fn invoice(no: &str, total: f64) -> Invoice {
        Invoice {
            invoice_no: no.to_string(),
            customer_name: format!("Customer {no}"),
            customer_address: "Ring Road, Surat".to_string(),
            items: vec![
                Item {
                    description: "Fabric".to_string(),
                    amount: total - 100.0,
                },
                Item {
                    description: "Freight".to_string(),
                    amount: 100.0,
                },
            ],
            total,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T08:15:30+05:30").unwrap(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            is_paid: true,
            company_name: "alpha".to_string(),
            paid_amount: total - 10.0,
            withheld_amount: 10.0,
            transaction_type: "cheque".to_string(),
        }
    }

    #[test]
    fn paths_are_lower_cased() {
        let store = CompanyStore::new("/srv/data");
        assert_eq!(
            store.invoices_path("ALPHA"),
            PathBuf::from("/srv/data/alpha/alpha_invoices.json")
        );
        assert_eq!(
            store.info_path("Alpha"),
            PathBuf::from("/srv/data/alpha/alpha_info.json")
        );
        assert_eq!(
            store.export_path("alpha"),
            PathBuf::from("/srv/data/alpha/invoices_export.csv")
        );
        assert_eq!(store.default_pdf_dir("alpha"), PathBuf::from("/srv/data/alpha/pdf"));
    }

    #[test]
    fn load_of_unknown_company_is_empty_and_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        let record = store.load("Gamma").unwrap();
        assert!(record.invoices.is_none());
        assert!(record.profile.is_none());
        assert!(!record.report.is_partial());
        assert!(dir.path().join("gamma").is_dir());
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        let invoices: Vec<Invoice> = (1..=5)
            .map(|n| invoice(&format!("a/24-25/{n:03}"), 1000.0 * n as f64))
            .collect();
        let profile = CompanyProfile {
            name: "Alpha".to_string(),
            company_name: "Alpha Textiles".to_string(),
            pan_no: "ABCDE1234F".to_string(),
            ..CompanyProfile::default()
        };

        store
            .save("alpha", Some(invoices.as_slice()), Some(&profile))
            .unwrap();
        let record = store.load("alpha").unwrap();

        assert_eq!(record.invoices.as_deref(), Some(invoices.as_slice()));
        assert_eq!(record.profile, Some(profile));
    }

    #[test]
    fn documents_are_pretty_printed_with_two_spaces() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        let invoices = vec![invoice("a/24-25/001", 500.0)];
        store.save("alpha", Some(invoices.as_slice()), None).unwrap();
        let content = fs::read_to_string(store.invoices_path("alpha")).unwrap();
        assert!(content.starts_with("[\n  {\n    \"invoiceNo\": \"a/24-25/001\""));
        assert!(!store.info_path("alpha").exists());
    }

    #[test]
    fn corrupt_documents_are_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        store.ensure_directory("alpha").unwrap();
        fs::write(store.invoices_path("alpha"), "[{ not json").unwrap();
        fs::write(store.info_path("alpha"), r#"{"name": "Alpha"}"#).unwrap();

        let record = store.load("alpha").unwrap();
        assert!(record.invoices.is_none());
        assert_eq!(record.profile.map(|p| p.name), Some("Alpha".to_string()));
        assert!(record.report.is_partial());
        assert!(matches!(
            &record.report.warnings[0],
            LoadWarning::Corrupt { path, .. } if path.ends_with("alpha_invoices.json")
        ));
    }

    #[test]
    fn null_invoice_document_loads_as_empty_ledger() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        store.ensure_directory("alpha").unwrap();
        fs::write(store.invoices_path("alpha"), "null").unwrap();

        let record = store.load("alpha").unwrap();
        assert_eq!(record.invoices, Some(Vec::new()));
    }

    #[test]
    fn legacy_invoices_get_company_name() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        store.ensure_directory("mital").unwrap();
        fs::write(
            store.invoices_path("mital"),
            r#"[{"invoiceNo": "m/23-24/001", "total": 50, "createdAt": "2023-06-01T10:00:00Z"}]"#,
        )
        .unwrap();

        let invoices = store.load("MITAL").unwrap().invoices.unwrap();
        assert_eq!(invoices[0].company_name, "mital");
        assert_eq!(invoices[0].paid_amount, 50.0);
    }

    #[test]
    fn discover_lists_company_directories() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path());
        store.ensure_directory("rachana").unwrap();
        store.ensure_directory("dhanchha").unwrap();
        fs::write(dir.path().join("stray.txt"), "x").unwrap();
        assert_eq!(store.discover().unwrap(), vec!["dhanchha", "rachana"]);
    }

    #[test]
    fn discover_of_missing_base_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = CompanyStore::new(dir.path().join("absent"));
        assert!(store.discover().unwrap().is_empty());
    }

    #[test]
    fn blocked_directory_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha"), "a file, not a directory").unwrap();
        let store = CompanyStore::new(dir.path());
        let err = store.ensure_directory("alpha").unwrap_err();
        assert!(matches!(err, InvoiceError::StorageUnavailable { .. }));
    }
}
