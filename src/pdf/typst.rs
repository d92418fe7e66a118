use serde::Serialize;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::config::CompanyProfile;
use crate::error::{InvoiceError, Result};
use crate::ledger::{Invoice, Item};
use crate::pdf::words::amount_in_words;

/// Data handed to the Typst template as `data.json`.
#[derive(Debug, Serialize)]
pub struct InvoicePdfData {
    pub number: String,
    pub date: String,
    pub transaction_type: String,
    pub company: CompanyProfile,
    pub customer_name: String,
    pub customer_address: Vec<String>,
    pub items: Vec<Item>,
    pub total: f64,
    pub total_in_words: String,
    pub currency_symbol: String,
}

impl InvoicePdfData {
    pub fn new(invoice: &Invoice, company: CompanyProfile, currency_symbol: &str) -> Self {
        Self {
            number: invoice.invoice_no.clone(),
            date: invoice.invoice_date.format("%d-%m-%Y").to_string(),
            transaction_type: invoice.transaction_type.clone(),
            company,
            customer_name: invoice.customer_name.clone(),
            customer_address: invoice
                .customer_address
                .split(',')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            items: invoice.items.clone(),
            total: invoice.total,
            total_in_words: amount_in_words(invoice.total),
            currency_symbol: currency_symbol.to_string(),
        }
    }
}

/// Embedded Typst template for invoice generation
/// Uses a placeholder that gets replaced with the actual JSON file path
pub const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(paper: "a4", margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm))
#set text(font: "Helvetica", size: 10pt)

#let fmt-currency(amount) = {
  let parts = str(calc.round(amount, digits: 2)).split(".")
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  data.currency_symbol + parts.at(0) + "." + frac2
}

// Header: company on the left, invoice details on the right
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #if data.company.companyName != "" [
      #text(size: 16pt, weight: "bold")[#upper(data.company.companyName)]
    ]
    #for part in data.company.companyAddress.split(",") [
      #part.trim() \
    ]
    #if data.company.email != "" [ #data.company.email ]
  ],
  [
    #text(size: 22pt, weight: "bold")[INVOICE]
    #v(0.4em)
    #table(
      columns: (auto, auto),
      stroke: none,
      align: (right, left),
      inset: 2pt,
      [*Invoice No.:*], [#data.number],
      [*Date:*], [#data.date],
      [*Transaction Type:*], [#data.transaction_type],
      ..if data.company.panNo != "" { ([*PAN:*], [#data.company.panNo]) } else { () },
    )
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Customer block
#text(weight: "bold", size: 11pt)[Bill To:]
#v(0.3em)
#text(weight: "bold")[#data.customer_name]
#for part in data.customer_address [
  \ #part
]

#v(1.5em)

// Line items
#table(
  columns: (auto, 1fr, auto),
  align: (center, left, right),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 8pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },
  [*\#*], [*Description*], [*Amount*],
  ..data.items.enumerate().map(((i, item)) => (
    str(i + 1),
    item.description,
    [#fmt-currency(item.amount)],
  )).flatten()
)

#v(1em)

// Total
#align(right)[
  #text(size: 12pt, weight: "bold")[Total: #fmt-currency(data.total)]
]
#text(style: "italic")[#data.total_in_words]

#v(2em)

#if data.company.bankName != "" [
  #text(weight: "bold")[Bank Details] \
  #data.company.bankName \
  A/C No: #data.company.accountNo \
  IFSC: #data.company.ifsc
]
"##;

/// Generate PDF using Typst CLI
///
/// `template` replaces the embedded template; it must read its data from
/// `json("data.json")` or the `DATA_JSON_PATH` placeholder.
pub fn generate_pdf(data: &InvoicePdfData, output_path: &Path, template: Option<&str>) -> Result<()> {
    // Check if typst is available
    if Command::new("typst").arg("--version").output().is_err() {
        return Err(InvoiceError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join(format!("invoicedesk-{}", std::process::id()));
    std::fs::create_dir_all(&temp_dir)?;

    let json_data = serde_json::to_string(data)
        .map_err(|source| InvoiceError::Serialize { what: "pdf data", source })?;
    let json_path = temp_dir.join("data.json");
    std::fs::write(&json_path, &json_data)?;

    let template_content = template
        .unwrap_or(INVOICE_TEMPLATE)
        .replace("DATA_JSON_PATH", "data.json");
    let template_path = temp_dir.join("invoice.typ");
    std::fs::write(&template_path, &template_content)?;

    debug!(output = %output_path.display(), "running typst compile");
    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(&temp_dir)
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    let _ = std::fs::remove_dir_all(&temp_dir);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InvoiceError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    #[test]
    fn pdf_data_splits_address_and_spells_total() {
        let invoice = Invoice {
            invoice_no: "a/24-25/003".to_string(),
            customer_name: "Ravi".to_string(),
            customer_address: "12 Ring Road, , Surat ".to_string(),
            items: vec![],
            total: 100.0,
            created_at: DateTime::parse_from_rfc3339("2024-04-15T11:00:00+05:30").unwrap(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            is_paid: false,
            company_name: "alpha".to_string(),
            paid_amount: 100.0,
            withheld_amount: 0.0,
            transaction_type: "cheque".to_string(),
        };
        let data = InvoicePdfData::new(&invoice, CompanyProfile::for_company("alpha"), "Rs. ");
        assert_eq!(data.customer_address, vec!["12 Ring Road", "Surat"]);
        assert_eq!(data.date, "15-04-2024");
        assert_eq!(data.total_in_words, "One Hundred Rupees Only");

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["company"]["companyName"], "alpha");
    }

    #[test]
    fn embedded_template_reads_placeholder() {
        assert!(INVOICE_TEMPLATE.contains("json(\"DATA_JSON_PATH\")"));
    }
}
