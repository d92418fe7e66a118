mod book;
mod clock;
mod invoice;
mod numbering;

pub use book::InvoiceLedger;
pub use clock::{Clock, FixedClock, SystemClock};
pub use invoice::{parse_invoice_date, Invoice, InvoiceInput, InvoiceSummary, Item, INPUT_DATE_FORMAT};
pub use numbering::{fiscal_year_label, next_invoice_number};
