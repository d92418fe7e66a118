use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use invoicedesk::config::{
    config_dir, expand_path, load_settings, resolve_data_dir, settings_file, Settings,
    SETTINGS_TEMPLATE,
};
use invoicedesk::error::{InvoiceError, Result};
use invoicedesk::ledger::{InvoiceInput, InvoiceLedger, Item};
use invoicedesk::store::{company_key, CompanyStore};
use invoicedesk::CompanyProfile;

#[derive(Parser)]
#[command(name = "invoicedesk")]
#[command(version, about = "Per-company invoice ledger with CSV and PDF export", long_about = None)]
struct Cli {
    /// Path to settings directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Base data directory (overrides data_dir from settings.toml)
    #[arg(short = 'D', long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the settings directory with a template settings.toml
    Init,

    /// List loaded companies
    Companies,

    /// Add a new invoice
    Add {
        /// Company key (case-insensitive)
        #[arg(short, long)]
        company: String,

        /// Customer name
        #[arg(long)]
        customer: String,

        /// Customer address (commas become line breaks on the PDF)
        #[arg(long, default_value = "")]
        address: String,

        /// Line items in format "description:amount" (can be repeated)
        #[arg(short, long, value_name = "DESC:AMOUNT")]
        item: Vec<String>,

        /// Invoice total (default: sum of item amounts)
        #[arg(long)]
        total: Option<f64>,

        /// Invoice date YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Invoice number (default: next in sequence)
        #[arg(short, long)]
        number: Option<String>,

        /// Transaction type, e.g. online or cheque
        #[arg(long = "type", default_value = "")]
        transaction_type: String,
    },

    /// Show one invoice in full
    Show {
        #[arg(short, long)]
        company: String,

        /// Invoice number (e.g., a/24-25/001)
        invoice: String,
    },

    /// List a company's invoices
    List {
        #[arg(short, long)]
        company: String,

        /// Number of most recent invoices to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Edit an existing invoice (unspecified fields keep their values)
    Edit {
        #[arg(short, long)]
        company: String,

        /// Current invoice number
        invoice: String,

        /// New invoice number
        #[arg(short, long)]
        number: Option<String>,

        #[arg(long)]
        customer: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Replacement line items "description:amount" (replaces all items)
        #[arg(short, long, value_name = "DESC:AMOUNT")]
        item: Vec<String>,

        /// New total (default: sum of replacement items, else unchanged)
        #[arg(long)]
        total: Option<f64>,

        /// New invoice date YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },

    /// Record the amount received; the rest of the total counts as withheld
    Pay {
        #[arg(short, long)]
        company: String,

        invoice: String,

        /// Amount actually received
        amount: f64,
    },

    /// Flip an invoice between paid and unpaid
    TogglePaid {
        #[arg(short, long)]
        company: String,

        invoice: String,
    },

    /// Export a company's invoices to invoices_export.csv
    Export {
        #[arg(short, long)]
        company: String,
    },

    /// Render an invoice PDF with Typst
    Pdf {
        #[arg(short, long)]
        company: String,

        invoice: String,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Save a pre-rendered base64 PDF for an invoice
    SavePdf {
        #[arg(short, long)]
        company: String,

        invoice: String,

        /// File holding the base64 payload ("-" for stdin)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show or set the directory PDFs are saved to
    PdfDir {
        #[arg(short, long)]
        company: String,

        /// New directory
        dir: Option<PathBuf>,
    },

    /// Show or update the company profile
    Profile {
        #[arg(short, long)]
        company: String,

        #[command(flatten)]
        fields: ProfileArgs,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Short display name
    #[arg(long)]
    name: Option<String>,

    /// Legal name printed on invoices
    #[arg(long)]
    legal_name: Option<String>,

    #[arg(long)]
    address: Option<String>,

    /// PAN (tax identifier)
    #[arg(long)]
    pan: Option<String>,

    #[arg(long)]
    bank: Option<String>,

    #[arg(long)]
    account: Option<String>,

    #[arg(long)]
    ifsc: Option<String>,

    #[arg(long)]
    email: Option<String>,
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.legal_name.is_none()
            && self.address.is_none()
            && self.pan.is_none()
            && self.bank.is_none()
            && self.account.is_none()
            && self.ifsc.is_none()
            && self.email.is_none()
    }

    fn apply(self, profile: &mut CompanyProfile) {
        let fields = [
            (self.name, &mut profile.name),
            (self.legal_name, &mut profile.company_name),
            (self.address, &mut profile.company_address),
            (self.pan, &mut profile.pan_no),
            (self.bank, &mut profile.bank_name),
            (self.account, &mut profile.account_no),
            (self.ifsc, &mut profile.ifsc),
            (self.email, &mut profile.email),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl Commands {
    /// Company named on the command line, if any
    fn company(&self) -> Option<&str> {
        match self {
            Commands::Init | Commands::Companies => None,
            Commands::Add { company, .. }
            | Commands::Show { company, .. }
            | Commands::List { company, .. }
            | Commands::Edit { company, .. }
            | Commands::Pay { company, .. }
            | Commands::TogglePaid { company, .. }
            | Commands::Export { company }
            | Commands::Pdf { company, .. }
            | Commands::SavePdf { company, .. }
            | Commands::PdfDir { company, .. }
            | Commands::Profile { company, .. } => Some(company.as_str()),
        }
    }
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine settings directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    if let Commands::Init = cli.command {
        return cmd_init(&cfg_dir);
    }

    let settings = load_settings(&cfg_dir)?;
    let ledger = open_ledger(&settings, cli.data_dir.as_deref(), cli.command.company())?;

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Companies => cmd_companies(&ledger),
        Commands::Add {
            company,
            customer,
            address,
            item,
            total,
            date,
            number,
            transaction_type,
        } => {
            let items = parse_items(&item)?;
            let input = InvoiceInput {
                invoice_no: number.unwrap_or_default(),
                invoice_date: date.unwrap_or_default(),
                customer_name: customer,
                customer_address: address,
                total: total.unwrap_or_else(|| items.iter().map(|i| i.amount).sum()),
                items,
                transaction_type,
            };
            cmd_add(&ledger, &settings, &company, input)
        }
        Commands::Show { company, invoice } => cmd_show(&ledger, &settings, &company, &invoice),
        Commands::List { company, limit } => cmd_list(&ledger, &settings, &company, limit),
        Commands::Edit {
            company,
            invoice,
            number,
            customer,
            address,
            item,
            total,
            date,
        } => {
            let mut input = InvoiceInput::from_invoice(&ledger.find(&company, &invoice)?);
            if let Some(number) = number {
                input.invoice_no = number;
            }
            if let Some(customer) = customer {
                input.customer_name = customer;
            }
            if let Some(address) = address {
                input.customer_address = address;
            }
            if !item.is_empty() {
                input.items = parse_items(&item)?;
                input.total = input.items.iter().map(|i| i.amount).sum();
            }
            if let Some(total) = total {
                input.total = total;
            }
            if let Some(date) = date {
                input.invoice_date = date;
            }
            cmd_edit(&ledger, &settings, &company, &invoice, input)
        }
        Commands::Pay {
            company,
            invoice,
            amount,
        } => cmd_pay(&ledger, &settings, &company, &invoice, amount),
        Commands::TogglePaid { company, invoice } => cmd_toggle_paid(&ledger, &company, &invoice),
        Commands::Export { company } => cmd_export(&ledger, &company),
        Commands::Pdf {
            company,
            invoice,
            open,
        } => cmd_pdf(&ledger, &settings, &company, &invoice, open),
        Commands::SavePdf {
            company,
            invoice,
            file,
        } => cmd_save_pdf(&ledger, &company, &invoice, &file),
        Commands::PdfDir { company, dir } => cmd_pdf_dir(&ledger, &company, dir),
        Commands::Profile { company, fields } => cmd_profile(&ledger, &company, fields),
    }
}

/// Load the configured companies (every company directory when none are
/// configured) plus the one named on the command line.
fn open_ledger(settings: &Settings, data_dir: Option<&Path>, requested: Option<&str>) -> Result<InvoiceLedger> {
    let store = CompanyStore::new(resolve_data_dir(data_dir, settings));

    let mut companies: Vec<String> = if settings.companies.is_empty() {
        store.discover()?
    } else {
        settings.companies.iter().map(|c| company_key(c)).collect()
    };
    if let Some(requested) = requested.map(company_key) {
        if !requested.is_empty() && !companies.contains(&requested) {
            companies.push(requested);
        }
    }

    let (ledger, report) = InvoiceLedger::open(store, &companies)?;
    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    Ok(ledger)
}

/// Parse item input like "Consulting:1500" into an Item. The amount follows
/// the last colon, so descriptions may contain colons.
fn parse_item(input: &str) -> Result<Item> {
    let (description, amount) = input
        .rsplit_once(':')
        .ok_or_else(|| InvoiceError::InvalidItemFormat(input.to_string()))?;

    if description.trim().is_empty() {
        return Err(InvoiceError::InvalidItemFormat(input.to_string()));
    }

    let amount: f64 = amount.trim().parse().map_err(|_| InvoiceError::InvalidAmount {
        item: description.to_string(),
        amount: amount.to_string(),
    })?;

    Ok(Item {
        description: description.trim().to_string(),
        amount,
    })
}

fn parse_items(inputs: &[String]) -> Result<Vec<Item>> {
    inputs.iter().map(|i| parse_item(i)).collect()
}

/// Initialize settings directory with the template file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(InvoiceError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(settings_file(cfg_dir), SETTINGS_TEMPLATE)?;

    println!("Initialized invoicedesk settings at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Choose a data directory:  $EDITOR {}",
        settings_file(cfg_dir).display()
    );
    println!("  2. Fill in a company profile:");
    println!("       invoicedesk profile -c <company> --legal-name \"...\" --address \"...\"");
    println!("  3. Add your first invoice:");
    println!("       invoicedesk add -c <company> --customer \"...\" --item \"Consulting:1500\"");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "COMPANY")]
    key: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "INVOICES")]
    invoices: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "RECEIVED")]
    paid: String,
    #[tabled(rename = "WITHHELD")]
    withheld: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Format a money amount with two decimal places and thousands separators
fn format_amount(value: f64, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = format_grouped_int(whole.parse::<i64>().unwrap_or(0));
    let sign = if value < -0.004 { "-" } else { "" };
    format!("{sign}{currency_symbol}{grouped}.{frac}")
}

fn paid_label(is_paid: bool) -> &'static str {
    if is_paid {
        "PAID"
    } else {
        "UNPAID"
    }
}

/// List loaded companies
fn cmd_companies(ledger: &InvoiceLedger) -> Result<()> {
    let companies = ledger.companies();
    if companies.is_empty() {
        println!("No companies found in {}", ledger.store().base_dir().display());
        return Ok(());
    }

    let rows: Vec<CompanyRow> = companies
        .iter()
        .map(|key| CompanyRow {
            key: key.clone(),
            name: ledger
                .profile(key)
                .map(|p| if p.company_name.is_empty() { p.name } else { p.company_name })
                .unwrap_or_default(),
            invoices: ledger
                .list(key)
                .map(|list| list.len().to_string())
                .unwrap_or_else(|_| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Add a new invoice
fn cmd_add(ledger: &InvoiceLedger, settings: &Settings, company: &str, input: InvoiceInput) -> Result<()> {
    let total = input.total;
    let customer = input.customer_name.clone();
    let number = ledger.add(company, input)?;

    if number.is_empty() {
        println!("Added invoice without a number (previous number has no numeric sequence)");
    } else {
        println!("Added {}", number);
    }
    println!("  Customer: {}", customer);
    println!("  Total:    {}", format_amount(total, &settings.pdf.currency_symbol));

    Ok(())
}

/// Show one invoice in full
fn cmd_show(ledger: &InvoiceLedger, settings: &Settings, company: &str, invoice_no: &str) -> Result<()> {
    let invoice = ledger.find(company, invoice_no)?;
    let symbol = &settings.pdf.currency_symbol;

    println!("Invoice {}", invoice.invoice_no);
    println!("{}", "-".repeat(50));
    println!("Date:             {}", invoice.invoice_date);
    println!("Created:          {}", invoice.created_at.to_rfc3339());
    println!("Customer:         {}", invoice.customer_name);
    if !invoice.customer_address.is_empty() {
        println!("Address:          {}", invoice.customer_address);
    }
    if !invoice.transaction_type.is_empty() {
        println!("Transaction type: {}", invoice.transaction_type);
    }

    if !invoice.items.is_empty() {
        let rows: Vec<ItemRow> = invoice
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| ItemRow {
                index: idx + 1,
                description: item.description.clone(),
                amount: format_amount(item.amount, symbol),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    println!("Total:            {}", format_amount(invoice.total, symbol));
    println!("Received:         {}", format_amount(invoice.paid_amount, symbol));
    println!("Withheld:         {}", format_amount(invoice.withheld_amount, symbol));
    println!("Status:           {}", paid_label(invoice.is_paid));

    Ok(())
}

/// List a company's invoices, most recent first
fn cmd_list(ledger: &InvoiceLedger, settings: &Settings, company: &str, limit: Option<usize>) -> Result<()> {
    let invoices = ledger.list(company)?;
    let symbol = &settings.pdf.currency_symbol;

    if invoices.is_empty() {
        println!("No invoices recorded for '{}' yet.", company_key(company));
        return Ok(());
    }

    let shown: Vec<_> = invoices
        .iter()
        .rev()
        .take(limit.unwrap_or(invoices.len()))
        .collect();

    let rows: Vec<InvoiceRow> = shown
        .iter()
        .map(|inv| InvoiceRow {
            number: inv.invoice_no.clone(),
            date: inv.invoice_date.to_string(),
            customer: inv.customer_name.clone(),
            total: format_amount(inv.total, symbol),
            paid: format_amount(inv.paid_amount, symbol),
            withheld: format_amount(inv.withheld_amount, symbol),
            status: paid_label(inv.is_paid).to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let billed: f64 = shown.iter().map(|inv| inv.total).sum();
    let received: f64 = shown.iter().map(|inv| inv.paid_amount).sum();
    let withheld: f64 = shown.iter().map(|inv| inv.withheld_amount).sum();

    println!();
    println!("Total: {} invoices", invoices.len());
    println!(
        "Billed {}  Received {}  Withheld {}",
        format_amount(billed, symbol),
        format_amount(received, symbol),
        format_amount(withheld, symbol)
    );

    Ok(())
}

/// Edit an existing invoice
fn cmd_edit(
    ledger: &InvoiceLedger,
    settings: &Settings,
    company: &str,
    invoice_no: &str,
    input: InvoiceInput,
) -> Result<()> {
    let new_number = input.invoice_no.clone();
    ledger.update(company, invoice_no, input)?;
    let invoice = ledger.find(company, &new_number)?;

    if new_number != invoice_no {
        println!("Updated {} (now {})", invoice_no, new_number);
    } else {
        println!("Updated {}", invoice_no);
    }
    println!("  Customer: {}", invoice.customer_name);
    println!("  Date:     {}", invoice.invoice_date);
    println!(
        "  Total:    {}",
        format_amount(invoice.total, &settings.pdf.currency_symbol)
    );

    Ok(())
}

/// Record the amount received for an invoice
fn cmd_pay(ledger: &InvoiceLedger, settings: &Settings, company: &str, invoice_no: &str, amount: f64) -> Result<()> {
    ledger.update_amounts(company, invoice_no, amount)?;
    let invoice = ledger.find(company, invoice_no)?;
    let symbol = &settings.pdf.currency_symbol;

    println!(
        "Recorded {} received for {} ({} withheld)",
        format_amount(invoice.paid_amount, symbol),
        invoice.invoice_no,
        format_amount(invoice.withheld_amount, symbol)
    );

    Ok(())
}

fn cmd_toggle_paid(ledger: &InvoiceLedger, company: &str, invoice_no: &str) -> Result<()> {
    let paid = ledger.toggle_paid(company, invoice_no)?;
    println!(
        "Marked {} as {}",
        invoice_no,
        if paid { "paid" } else { "unpaid" }
    );
    Ok(())
}

fn cmd_export(ledger: &InvoiceLedger, company: &str) -> Result<()> {
    let path = ledger.export_csv(company)?;
    println!("Exported {}", path.display());
    Ok(())
}

/// Render an invoice PDF
fn cmd_pdf(ledger: &InvoiceLedger, settings: &Settings, company: &str, invoice_no: &str, open: bool) -> Result<()> {
    let template = match &settings.pdf.template {
        Some(path) => Some(std::fs::read_to_string(expand_path(path))?),
        None => None,
    };

    let pdf_path = ledger.render_invoice_pdf(
        company,
        invoice_no,
        &settings.pdf.currency_symbol,
        template.as_deref(),
    )?;

    println!("Generated {}", invoice_no);
    println!("  Saved: {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }
    Ok(())
}

/// Save a base64 PDF produced elsewhere
fn cmd_save_pdf(ledger: &InvoiceLedger, company: &str, invoice_no: &str, file: &Path) -> Result<()> {
    let payload = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };

    let pdf_path = ledger.save_invoice_pdf(company, invoice_no, &payload)?;
    println!("Saved {}", pdf_path.display());
    Ok(())
}

fn cmd_pdf_dir(ledger: &InvoiceLedger, company: &str, dir: Option<PathBuf>) -> Result<()> {
    let key = company_key(company);

    if let Some(dir) = dir {
        ledger.set_pdf_save_path(&key, &dir)?;
        println!("PDFs for '{}' will be saved to {}", key, dir.display());
        return Ok(());
    }

    match ledger.pdf_save_path(&key) {
        Ok(Some(dir)) => println!("{}", dir.display()),
        Ok(None) | Err(InvoiceError::CompanyNotFound(_)) => println!(
            "{} (default)",
            ledger.store().default_pdf_dir(&key).display()
        ),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn cmd_profile(ledger: &InvoiceLedger, company: &str, fields: ProfileArgs) -> Result<()> {
    let key = company_key(company);

    if fields.is_empty() {
        let profile = ledger.profile(&key)?;
        println!("Company profile: {}", key);
        println!("{}", "-".repeat(50));
        println!("Name:       {}", profile.name);
        println!("Legal name: {}", profile.company_name);
        println!("Address:    {}", profile.company_address);
        println!("PAN:        {}", profile.pan_no);
        println!("Bank:       {}", profile.bank_name);
        println!("Account:    {}", profile.account_no);
        println!("IFSC:       {}", profile.ifsc);
        println!("Email:      {}", profile.email);
        if let Some(dir) = profile.pdf_dir() {
            println!("PDF dir:    {}", dir.display());
        }
        return Ok(());
    }

    let mut profile = match ledger.profile(&key) {
        Ok(profile) => profile,
        Err(InvoiceError::CompanyNotFound(_)) => CompanyProfile::for_company(&key),
        Err(e) => return Err(e),
    };
    fields.apply(&mut profile);
    ledger.set_profile(&key, profile)?;

    println!("Updated profile for '{}'", key);
    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_with_colons_in_description() {
        let item = parse_item("Ref: PO 42:1500.50").unwrap();
        assert_eq!(item.description, "Ref: PO 42");
        assert_eq!(item.amount, 1500.5);
    }

    #[test]
    fn rejects_bad_items() {
        assert!(matches!(
            parse_item("Consulting"),
            Err(InvoiceError::InvalidItemFormat(_))
        ));
        assert!(matches!(
            parse_item(":100"),
            Err(InvoiceError::InvalidItemFormat(_))
        ));
        assert!(matches!(
            parse_item("Consulting:lots"),
            Err(InvoiceError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn formats_amounts_with_grouping() {
        assert_eq!(format_amount(1234567.5, "Rs. "), "Rs. 1,234,567.50");
        assert_eq!(format_amount(0.0, "$"), "$0.00");
        assert_eq!(format_amount(-200.0, "$"), "-$200.00");
    }
}
