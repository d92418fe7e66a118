mod typst;
mod words;

pub use typst::{generate_pdf, InvoicePdfData, INVOICE_TEMPLATE};
pub use words::amount_in_words;

use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::CompanyProfile;
use crate::error::{InvoiceError, Result};
use crate::ledger::InvoiceLedger;
use crate::store::CompanyStore;

/// Make an invoice number usable as a file name (`a/24-25/001` becomes
/// `a-24-25-001`).
pub fn sanitize_invoice_no(invoice_no: &str) -> String {
    invoice_no.replace(['/', '\\'], "-")
}

/// Decode a base64 PDF payload.
pub fn decode_pdf(payload: &str) -> Result<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(payload.trim())?)
}

/// Directory PDFs of a company go to, without touching the filesystem.
fn configured_pdf_dir(store: &CompanyStore, key: &str, profile: Option<&CompanyProfile>) -> PathBuf {
    profile
        .and_then(CompanyProfile::pdf_dir)
        .unwrap_or_else(|| store.default_pdf_dir(key))
}

/// Directory PDFs of a company go to, created if missing. A custom directory
/// that cannot be created falls back to the default one.
fn prepare_pdf_dir(store: &CompanyStore, key: &str, profile: Option<&CompanyProfile>) -> Result<PathBuf> {
    let default_dir = store.default_pdf_dir(key);

    if let Some(custom) = profile.and_then(CompanyProfile::pdf_dir) {
        match fs::create_dir_all(&custom) {
            Ok(()) => return Ok(custom),
            Err(e) => warn!(
                company = %key,
                dir = %custom.display(),
                error = %e,
                "cannot create custom pdf directory, using default"
            ),
        }
    }

    fs::create_dir_all(&default_dir).map_err(|e| InvoiceError::storage(&default_dir, e))?;
    Ok(default_dir)
}

fn pdf_file(dir: &Path, invoice_no: &str) -> PathBuf {
    dir.join(format!("{}.pdf", sanitize_invoice_no(invoice_no)))
}

impl InvoiceLedger {
    /// Where the PDF for `invoice_no` is (or would be) written.
    pub fn pdf_path(&self, company: &str, invoice_no: &str) -> Result<PathBuf> {
        self.with_book(company, |key, book| {
            let profile = book.and_then(|b| b.profile.as_ref());
            Ok(pdf_file(&configured_pdf_dir(self.store(), key, profile), invoice_no))
        })
    }

    /// Decode a pre-rendered PDF and write it to the company's PDF
    /// directory. Nothing is written when the payload is not valid base64.
    pub fn save_invoice_pdf(&self, company: &str, invoice_no: &str, pdf_base64: &str) -> Result<PathBuf> {
        let bytes = decode_pdf(pdf_base64)?;

        self.with_book(company, |key, book| {
            let profile = book.and_then(|b| b.profile.as_ref());
            let path = pdf_file(&prepare_pdf_dir(self.store(), key, profile)?, invoice_no);
            fs::write(&path, &bytes).map_err(|e| InvoiceError::storage(&path, e))?;

            info!(company = %key, invoice = %invoice_no, path = %path.display(), "pdf saved");
            Ok(path)
        })
    }

    /// Render an invoice with Typst into the company's PDF directory.
    pub fn render_invoice_pdf(
        &self,
        company: &str,
        invoice_no: &str,
        currency_symbol: &str,
        template: Option<&str>,
    ) -> Result<PathBuf> {
        let invoice = self.find(company, invoice_no)?;

        self.with_book(company, |key, book| {
            let profile = book.and_then(|b| b.profile.as_ref());
            let data = InvoicePdfData::new(
                &invoice,
                profile.cloned().unwrap_or_else(|| CompanyProfile::for_company(key)),
                currency_symbol,
            );
            let path = pdf_file(&prepare_pdf_dir(self.store(), key, profile)?, invoice_no);
            generate_pdf(&data, &path, template)?;

            info!(company = %key, invoice = %invoice_no, path = %path.display(), "pdf rendered");
            Ok(path)
        })
    }
}
