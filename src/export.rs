use chrono::SecondsFormat;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::error::{InvoiceError, Result};
use crate::ledger::{Invoice, InvoiceLedger};

pub const CSV_HEADER: [&str; 8] = [
    "Invoice No",
    "Customer Name",
    "Customer Address",
    "Total",
    "Paid Amount",
    "TDS Amount",
    "Created At",
    "Is Paid",
];

/// Write invoices as CSV: one header row, then one row per invoice in ledger
/// order. Amounts carry two decimals and the creation time is RFC 3339 in
/// whole seconds.
pub fn write_csv<W: Write>(writer: W, invoices: &[Invoice]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for invoice in invoices {
        csv.write_record([
            invoice.invoice_no.clone(),
            invoice.customer_name.clone(),
            invoice.customer_address.clone(),
            format!("{:.2}", invoice.total),
            format!("{:.2}", invoice.paid_amount),
            format!("{:.2}", invoice.withheld_amount),
            invoice.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            invoice.is_paid.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

impl InvoiceLedger {
    /// Export the company's ledger to `<company>/invoices_export.csv` and
    /// return the file path. A company without invoices gets a header-only
    /// file.
    pub fn export_csv(&self, company: &str) -> Result<PathBuf> {
        self.with_book(company, |key, book| {
            self.store().ensure_directory(key)?;
            let path = self.store().export_path(key);
            let file = File::create(&path).map_err(|e| InvoiceError::storage(&path, e))?;

            let invoices = book
                .and_then(|b| b.invoices.as_deref())
                .unwrap_or_default();
            write_csv(file, invoices)?;

            info!(company = %key, rows = invoices.len(), path = %path.display(), "exported csv");
            Ok(path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FixedClock, InvoiceInput, Item};
    use crate::store::CompanyStore;
    use chrono::DateTime;
    use std::fs;
    use tempfile::TempDir;

    fn ledger(dir: &TempDir) -> InvoiceLedger {
        let now = DateTime::parse_from_rfc3339("2024-04-15T11:00:00+05:30").unwrap();
        InvoiceLedger::with_clock(CompanyStore::new(dir.path()), FixedClock(now))
    }

    #[test]
    fn exports_rows_in_ledger_order() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger
            .add(
                "alpha",
                InvoiceInput {
                    customer_name: "Ravi".to_string(),
                    customer_address: "12, Ring Road, Surat".to_string(),
                    items: vec![Item {
                        description: "Weaving".to_string(),
                        amount: 1000.0,
                    }],
                    total: 1000.0,
                    ..InvoiceInput::default()
                },
            )
            .unwrap();
        ledger
            .add(
                "alpha",
                InvoiceInput {
                    customer_name: "Meena".to_string(),
                    total: 250.5,
                    ..InvoiceInput::default()
                },
            )
            .unwrap();
        ledger.update_amounts("alpha", "a/24-25/001", 900.0).unwrap();
        ledger.toggle_paid("alpha", "a/24-25/002").unwrap();

        let path = ledger.export_csv("ALPHA").unwrap();
        assert_eq!(path, dir.path().join("alpha").join("invoices_export.csv"));

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Invoice No,Customer Name,Customer Address,Total,Paid Amount,TDS Amount,Created At,Is Paid"
        );
        assert_eq!(
            lines[1],
            "a/24-25/001,Ravi,\"12, Ring Road, Surat\",1000.00,900.00,100.00,2024-04-15T11:00:00+05:30,false"
        );
        assert_eq!(
            lines[2],
            "a/24-25/002,Meena,,250.50,250.50,0.00,2024-04-15T11:00:00+05:30,true"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn created_at_drops_fractional_seconds() {
        let dir = TempDir::new().unwrap();
        let now = DateTime::parse_from_rfc3339("2024-04-15T11:00:00.889218621Z").unwrap();
        let ledger = InvoiceLedger::with_clock(CompanyStore::new(dir.path()), FixedClock(now));
        ledger
            .add(
                "alpha",
                InvoiceInput {
                    customer_name: "R".to_string(),
                    total: 10.0,
                    ..InvoiceInput::default()
                },
            )
            .unwrap();

        let content = fs::read_to_string(ledger.export_csv("alpha").unwrap()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "a/24-25/001,R,,10.00,10.00,0.00,2024-04-15T11:00:00Z,false");
    }

    #[test]
    fn unknown_company_exports_header_only() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        let path = ledger.export_csv("nobody").unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
