use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};

/// Date format accepted from callers.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A line item on an invoice
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Item {
    pub description: String,
    pub amount: f64,
}

/// One billing record in a company's ledger.
///
/// Serialized in the camelCase document shape stored in
/// `<company>_invoices.json`. Deserialization goes through
/// [`InvoiceDocument`] so documents written by earlier versions are upgraded
/// as they load.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", from = "InvoiceDocument")]
pub struct Invoice {
    pub invoice_no: String,
    pub customer_name: String,
    pub customer_address: String,
    pub items: Vec<Item>,
    pub total: f64,
    pub created_at: DateTime<FixedOffset>,
    #[serde(serialize_with = "serialize_invoice_date")]
    pub invoice_date: NaiveDate,
    pub is_paid: bool,
    pub company_name: String,
    pub paid_amount: f64,
    /// Total minus paid amount; negative when overpaid
    #[serde(rename = "tdsAmount")]
    pub withheld_amount: f64,
    pub transaction_type: String,
}

impl Invoice {
    /// Record the amount actually received; the remainder counts as withheld.
    pub fn set_paid_amount(&mut self, paid_amount: f64) {
        self.paid_amount = paid_amount;
        self.withheld_amount = self.total - paid_amount;
    }

    /// Flip the paid flag, returning the new value.
    pub fn toggle_paid(&mut self) -> bool {
        self.is_paid = !self.is_paid;
        self.is_paid
    }
}

/// Invoice fields supplied by a caller when creating or editing.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceInput {
    /// Empty asks the ledger to generate the next number
    pub invoice_no: String,
    /// `YYYY-MM-DD`
    pub invoice_date: String,
    pub customer_name: String,
    pub customer_address: String,
    pub items: Vec<Item>,
    pub total: f64,
    pub transaction_type: String,
}

impl InvoiceInput {
    /// Input that reproduces an existing invoice, for edits that only touch
    /// some fields.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_no: invoice.invoice_no.clone(),
            invoice_date: invoice.invoice_date.format(INPUT_DATE_FORMAT).to_string(),
            customer_name: invoice.customer_name.clone(),
            customer_address: invoice.customer_address.clone(),
            items: invoice.items.clone(),
            total: invoice.total,
            transaction_type: invoice.transaction_type.clone(),
        }
    }
}

/// List projection of an invoice (no address, no items)
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub invoice_no: String,
    pub customer_name: String,
    pub total: f64,
    pub created_at: DateTime<FixedOffset>,
    #[serde(serialize_with = "serialize_invoice_date")]
    pub invoice_date: NaiveDate,
    pub is_paid: bool,
    pub paid_amount: f64,
    #[serde(rename = "tdsAmount")]
    pub withheld_amount: f64,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            invoice_no: invoice.invoice_no.clone(),
            customer_name: invoice.customer_name.clone(),
            total: invoice.total,
            created_at: invoice.created_at,
            invoice_date: invoice.invoice_date,
            is_paid: invoice.is_paid,
            paid_amount: invoice.paid_amount,
            withheld_amount: invoice.withheld_amount,
        }
    }
}

/// Invoice dates are stored as midnight UTC timestamps (`2024-04-14T00:00:00Z`),
/// the shape every earlier ledger version can read back.
fn serialize_invoice_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    let stamp = date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    serializer.serialize_str(&stamp)
}

/// Parse a caller-supplied `YYYY-MM-DD` date.
pub fn parse_invoice_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT).ok()
}

/// Stored invoice as it may appear on disk, across document versions.
///
/// The earliest documents carry neither payment amounts nor a transaction
/// type, and write the invoice date as a full timestamp.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceDocument {
    #[serde(default)]
    invoice_no: String,
    #[serde(default)]
    customer_name: String,
    #[serde(default)]
    customer_address: String,
    #[serde(default)]
    items: Option<Vec<Item>>,
    #[serde(default)]
    total: f64,
    created_at: DateTime<FixedOffset>,
    #[serde(default)]
    invoice_date: Option<String>,
    #[serde(default)]
    is_paid: bool,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    paid_amount: Option<f64>,
    #[serde(default)]
    tds_amount: Option<f64>,
    #[serde(default)]
    transaction_type: String,
}

impl From<InvoiceDocument> for Invoice {
    fn from(doc: InvoiceDocument) -> Self {
        let invoice_date = doc
            .invoice_date
            .as_deref()
            .and_then(parse_stored_date)
            .unwrap_or_else(|| doc.created_at.date_naive());
        let paid_amount = doc.paid_amount.unwrap_or(doc.total);
        let withheld_amount = doc.tds_amount.unwrap_or(doc.total - paid_amount);

        Invoice {
            invoice_no: doc.invoice_no,
            customer_name: doc.customer_name,
            customer_address: doc.customer_address,
            items: doc.items.unwrap_or_default(),
            total: doc.total,
            created_at: doc.created_at,
            invoice_date,
            is_paid: doc.is_paid,
            company_name: doc.company_name,
            paid_amount,
            withheld_amount,
            transaction_type: doc.transaction_type,
        }
    }
}

fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    parse_invoice_date(raw).or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.date_naive())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Invoice {
        Invoice {
            invoice_no: "a/24-25/001".to_string(),
            customer_name: "Acme Traders".to_string(),
            customer_address: "12 Market Road, Surat".to_string(),
            items: vec![Item {
                description: "Consulting".to_string(),
                amount: 1500.0,
            }],
            total: 1500.0,
            created_at: DateTime::parse_from_rfc3339("2024-04-15T10:30:00+05:30").unwrap(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 4, 14).unwrap(),
            is_paid: false,
            company_name: "alpha".to_string(),
            paid_amount: 1500.0,
            withheld_amount: 0.0,
            transaction_type: "online".to_string(),
        }
    }

    #[test]
    fn document_uses_stored_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["invoiceNo"], "a/24-25/001");
        assert_eq!(value["invoiceDate"], "2024-04-14T00:00:00Z");
        assert_eq!(value["tdsAmount"], 0.0);
        assert_eq!(value["transactionType"], "online");
        assert!(value.get("withheldAmount").is_none());
    }

    #[test]
    fn stored_invoice_date_reads_back_unchanged() {
        let invoice = sample();
        let json = serde_json::to_string(&invoice).unwrap();
        let back: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(back.invoice_date, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());
        assert_eq!(back, invoice);
    }

    #[test]
    fn date_only_invoice_date_is_accepted() {
        let raw = r#"{"invoiceNo": "x", "total": 10, "createdAt": "2024-01-05T12:00:00Z", "invoiceDate": "2024-01-03"}"#;
        let invoice: Invoice = serde_json::from_str(raw).unwrap();
        assert_eq!(invoice.invoice_date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn earliest_document_shape_is_upgraded() {
        let raw = r#"{
          "invoiceNo": "d/23-24/007",
          "customerName": "Old Customer",
          "customerAddress": "Somewhere",
          "items": [{"description": "Goods", "amount": 400}],
          "total": 400,
          "createdAt": "2023-11-02T09:00:00+05:30",
          "invoiceDate": "2023-11-01T00:00:00Z"
        }"#;
        let invoice: Invoice = serde_json::from_str(raw).unwrap();
        assert_eq!(invoice.invoice_date, NaiveDate::from_ymd_opt(2023, 11, 1).unwrap());
        assert_eq!(invoice.paid_amount, 400.0);
        assert_eq!(invoice.withheld_amount, 0.0);
        assert!(!invoice.is_paid);
        assert!(invoice.transaction_type.is_empty());
    }

    #[test]
    fn missing_invoice_date_falls_back_to_creation_date() {
        let raw = r#"{"invoiceNo": "x", "total": 10, "createdAt": "2024-01-05T12:00:00Z", "items": null}"#;
        let invoice: Invoice = serde_json::from_str(raw).unwrap();
        assert_eq!(invoice.invoice_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!(invoice.items.is_empty());
    }

    #[test]
    fn paid_amount_drives_withheld_amount() {
        let mut invoice = sample();
        invoice.set_paid_amount(1350.0);
        assert_eq!(invoice.withheld_amount, 150.0);
        invoice.set_paid_amount(1600.0);
        assert_eq!(invoice.withheld_amount, -100.0);
        invoice.set_paid_amount(0.0);
        assert_eq!(invoice.withheld_amount, 1500.0);
    }

    #[test]
    fn input_round_trips_existing_invoice() {
        let invoice = sample();
        let input = InvoiceInput::from_invoice(&invoice);
        assert_eq!(input.invoice_date, "2024-04-14");
        assert_eq!(input.items, invoice.items);
        assert_eq!(parse_invoice_date(&input.invoice_date), Some(invoice.invoice_date));
    }

    #[test]
    fn rejects_non_iso_dates() {
        assert!(parse_invoice_date("15/04/2024").is_none());
        assert!(parse_invoice_date("").is_none());
        assert!(parse_invoice_date("2024-02-30").is_none());
    }
}
