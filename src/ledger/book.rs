use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::config::CompanyProfile;
use crate::error::{InvoiceError, Result};
use crate::ledger::clock::{Clock, SystemClock};
use crate::ledger::invoice::{parse_invoice_date, Invoice, InvoiceInput, InvoiceSummary};
use crate::ledger::numbering::next_invoice_number;
use crate::store::{company_key, CompanyStore, LoadReport};

/// In-memory state of one company. `None` documents were never loaded or
/// created.
#[derive(Debug, Default)]
pub(crate) struct CompanyBook {
    pub(crate) invoices: Option<Vec<Invoice>>,
    pub(crate) profile: Option<CompanyProfile>,
}

type SharedBook = Arc<Mutex<CompanyBook>>;

/// Invoice ledgers and profiles of every known company, mirrored to a
/// [`CompanyStore`] after each mutation.
///
/// Each company is guarded by its own mutex, held across the in-memory change
/// and the write to disk, so operations on one company never interleave.
pub struct InvoiceLedger {
    store: CompanyStore,
    clock: Box<dyn Clock>,
    books: RwLock<HashMap<String, SharedBook>>,
}

fn lock(book: &SharedBook) -> MutexGuard<'_, CompanyBook> {
    book.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InvoiceLedger {
    pub fn new(store: CompanyStore) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: CompanyStore, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            books: RwLock::new(HashMap::new()),
        }
    }

    /// Build a ledger and load the given companies from the store.
    pub fn open<S: AsRef<str>>(store: CompanyStore, companies: &[S]) -> Result<(Self, LoadReport)> {
        let ledger = Self::new(store);
        let report = ledger.load_companies(companies)?;
        Ok((ledger, report))
    }

    pub fn load_companies<S: AsRef<str>>(&self, companies: &[S]) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        for company in companies {
            report.extend(self.load_company(company.as_ref())?);
        }
        if report.is_partial() {
            warn!(skipped = report.warnings.len(), "some company documents could not be loaded");
        }
        Ok(report)
    }

    /// Load (or reload) one company. A company with no usable documents stays
    /// unknown until something is written for it.
    pub fn load_company(&self, company: &str) -> Result<LoadReport> {
        let key = company_key(company);
        let record = self.store.load(&key)?;

        if record.invoices.is_some() || record.profile.is_some() {
            let book = CompanyBook {
                invoices: record.invoices,
                profile: record.profile,
            };
            self.books
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.clone(), Arc::new(Mutex::new(book)));
            info!(company = %key, "company loaded");
        }

        Ok(record.report)
    }

    pub fn store(&self) -> &CompanyStore {
        &self.store
    }

    /// Keys of every company held in memory, sorted.
    pub fn companies(&self) -> Vec<String> {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = books.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn book(&self, key: &str) -> Option<SharedBook> {
        self.books
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn book_or_insert(&self, key: &str) -> SharedBook {
        if let Some(book) = self.book(key) {
            return book;
        }
        self.books
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    fn existing(&self, company: &str) -> Result<(String, SharedBook)> {
        let key = company_key(company);
        let book = self
            .book(&key)
            .ok_or_else(|| InvoiceError::CompanyNotFound(key.clone()))?;
        Ok((key, book))
    }

    fn persist(&self, key: &str, book: &CompanyBook) -> Result<()> {
        self.store
            .save(key, book.invoices.as_deref(), book.profile.as_ref())
    }

    /// Run `f` with the company's state locked. `book` is `None` for unknown
    /// companies.
    pub(crate) fn with_book<T>(
        &self,
        company: &str,
        f: impl FnOnce(&str, Option<&CompanyBook>) -> Result<T>,
    ) -> Result<T> {
        let key = company_key(company);
        match self.book(&key) {
            Some(shared) => {
                let book = lock(&shared);
                f(&key, Some(&*book))
            }
            None => f(&key, None),
        }
    }

    /// Whether no invoice of the company carries `invoice_no`.
    pub fn is_invoice_number_unique(&self, company: &str, invoice_no: &str) -> bool {
        let Some(book) = self.book(&company_key(company)) else {
            return true;
        };
        let book = lock(&book);
        book.invoices
            .as_ref()
            .map_or(true, |invoices| invoices.iter().all(|i| i.invoice_no != invoice_no))
    }

    /// Append a new invoice and persist the company. Returns the stored
    /// invoice number, which is empty when none was supplied and none could be
    /// generated.
    pub fn add(&self, company: &str, input: InvoiceInput) -> Result<String> {
        let key = company_key(company);
        if key.is_empty() {
            return Err(InvoiceError::CompanyNotFound(key));
        }

        let shared = self.book_or_insert(&key);
        let mut book = lock(&shared);

        let taken = !input.invoice_no.is_empty()
            && book
                .invoices
                .as_ref()
                .is_some_and(|invoices| invoices.iter().any(|i| i.invoice_no == input.invoice_no));
        if taken {
            return Err(InvoiceError::DuplicateInvoiceNumber {
                company: key,
                number: input.invoice_no,
            });
        }

        let now = self.clock.now();
        let invoice_date = parse_invoice_date(&input.invoice_date).unwrap_or_else(|| {
            debug!(date = %input.invoice_date, "unparseable invoice date, using today");
            now.date_naive()
        });

        let invoices = book.invoices.get_or_insert_with(Vec::new);

        let mut invoice_no = input.invoice_no;
        if invoice_no.is_empty() {
            let last = invoices.last().map(|i| i.invoice_no.as_str());
            match next_invoice_number(&key, last, now.date_naive()) {
                Some(number) => invoice_no = number,
                None => warn!(
                    company = %key,
                    last = ?last,
                    "previous invoice number has no numeric sequence, leaving new number empty"
                ),
            }
        }

        invoices.push(Invoice {
            invoice_no: invoice_no.clone(),
            customer_name: input.customer_name,
            customer_address: input.customer_address,
            items: input.items,
            total: input.total,
            created_at: now,
            invoice_date,
            is_paid: false,
            company_name: key.clone(),
            paid_amount: input.total,
            withheld_amount: 0.0,
            transaction_type: input.transaction_type,
        });

        self.persist(&key, &book)?;
        info!(company = %key, invoice = %invoice_no, "invoice added");
        Ok(invoice_no)
    }

    /// Full record of one invoice.
    pub fn find(&self, company: &str, invoice_no: &str) -> Result<Invoice> {
        let (key, shared) = self.existing(company)?;
        let book = lock(&shared);
        book.invoices
            .as_ref()
            .ok_or(InvoiceError::CompanyNotFound(key))?
            .iter()
            .find(|i| i.invoice_no == invoice_no)
            .cloned()
            .ok_or_else(|| InvoiceError::InvoiceNotFound(invoice_no.to_string()))
    }

    /// Every invoice of the company in ledger order, without addresses and
    /// line items.
    pub fn list(&self, company: &str) -> Result<Vec<InvoiceSummary>> {
        let (key, shared) = self.existing(company)?;
        let book = lock(&shared);
        let invoices = book
            .invoices
            .as_ref()
            .ok_or(InvoiceError::CompanyNotFound(key))?;
        Ok(invoices.iter().map(InvoiceSummary::from).collect())
    }

    /// Replace the editable fields of an invoice, possibly renaming it.
    ///
    /// The invoice date only changes when `input.invoice_date` parses; the
    /// transaction type and payment state are left as they are.
    pub fn update(&self, company: &str, original_no: &str, input: InvoiceInput) -> Result<()> {
        let (key, shared) = self.existing(company)?;
        let mut book = lock(&shared);
        let invoices = book
            .invoices
            .as_mut()
            .ok_or_else(|| InvoiceError::CompanyNotFound(key.clone()))?;

        if input.invoice_no != original_no
            && invoices.iter().any(|i| i.invoice_no == input.invoice_no)
        {
            return Err(InvoiceError::DuplicateInvoiceNumber {
                company: key,
                number: input.invoice_no,
            });
        }

        let invoice = invoices
            .iter_mut()
            .find(|i| i.invoice_no == original_no)
            .ok_or_else(|| InvoiceError::InvoiceNotFound(original_no.to_string()))?;

        invoice.invoice_no = input.invoice_no;
        invoice.customer_name = input.customer_name;
        invoice.customer_address = input.customer_address;
        invoice.items = input.items;
        invoice.total = input.total;
        if let Some(date) = parse_invoice_date(&input.invoice_date) {
            invoice.invoice_date = date;
        }
        let renamed = invoice.invoice_no.clone();

        self.persist(&key, &book)?;
        info!(company = %key, invoice = %original_no, now = %renamed, "invoice updated");
        Ok(())
    }

    /// Record the amount received; the withheld amount becomes
    /// `total - paid_amount` and may be negative.
    pub fn update_amounts(&self, company: &str, invoice_no: &str, paid_amount: f64) -> Result<()> {
        self.mutate_invoice(company, invoice_no, |invoice| invoice.set_paid_amount(paid_amount))
    }

    /// Flip the paid flag. Returns the new value.
    pub fn toggle_paid(&self, company: &str, invoice_no: &str) -> Result<bool> {
        self.mutate_invoice(company, invoice_no, Invoice::toggle_paid)
    }

    fn mutate_invoice<T>(
        &self,
        company: &str,
        invoice_no: &str,
        f: impl FnOnce(&mut Invoice) -> T,
    ) -> Result<T> {
        let (key, shared) = self.existing(company)?;
        let mut book = lock(&shared);
        let invoice = book
            .invoices
            .as_mut()
            .ok_or_else(|| InvoiceError::CompanyNotFound(key.clone()))?
            .iter_mut()
            .find(|i| i.invoice_no == invoice_no)
            .ok_or_else(|| InvoiceError::InvoiceNotFound(invoice_no.to_string()))?;

        let out = f(invoice);
        self.persist(&key, &book)?;
        debug!(company = %key, invoice = %invoice_no, "invoice changed");
        Ok(out)
    }

    pub fn profile(&self, company: &str) -> Result<CompanyProfile> {
        let (key, shared) = self.existing(company)?;
        let book = lock(&shared);
        book.profile.clone().ok_or(InvoiceError::CompanyNotFound(key))
    }

    /// Replace the company profile, creating the company if needed.
    pub fn set_profile(&self, company: &str, profile: CompanyProfile) -> Result<()> {
        let key = company_key(company);
        if key.is_empty() {
            return Err(InvoiceError::CompanyNotFound(key));
        }
        let shared = self.book_or_insert(&key);
        let mut book = lock(&shared);
        book.profile = Some(profile);
        self.persist(&key, &book)
    }

    /// Custom PDF directory, `None` when the default is in use.
    pub fn pdf_save_path(&self, company: &str) -> Result<Option<PathBuf>> {
        Ok(self.profile(company)?.pdf_dir())
    }

    /// Point the company's PDF output at `dir`, creating a bare profile if the
    /// company has none yet.
    pub fn set_pdf_save_path(&self, company: &str, dir: &Path) -> Result<()> {
        let key = company_key(company);
        if key.is_empty() {
            return Err(InvoiceError::CompanyNotFound(key));
        }
        let shared = self.book_or_insert(&key);
        let mut book = lock(&shared);
        book.profile
            .get_or_insert_with(|| CompanyProfile::for_company(&key))
            .pdf_save_path = dir.to_string_lossy().into_owned();
        self.persist(&key, &book)?;
        info!(company = %key, dir = %dir.display(), "pdf directory set");
        Ok(())
    }
}
