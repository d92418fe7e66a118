use chrono::{Datelike, NaiveDate};

/// Fiscal year label for a date. Fiscal years start in April, so both
/// 2024-04-01 and 2025-03-31 fall in "24-25".
///
/// Years are printed without zero padding ("9-10" for 2009).
pub fn fiscal_year_label(today: NaiveDate) -> String {
    let year = today.year();
    let (start, end) = if today.month() >= 4 {
        (year, year + 1)
    } else {
        (year - 1, year)
    };
    format!("{}-{}", start.rem_euclid(100), end.rem_euclid(100))
}

/// Next invoice number for a company, as `<initial>/<fiscal year>/<seq:03>`.
///
/// The sequence continues from the *last* invoice in the ledger, whatever its
/// fiscal year. Returns `None` when the last number is not three
/// `/`-separated segments ending in an integer; callers leave the number
/// empty in that case.
pub fn next_invoice_number(company: &str, last: Option<&str>, today: NaiveDate) -> Option<String> {
    let initial = company.chars().next()?;
    let label = fiscal_year_label(today);

    let Some(last) = last else {
        return Some(format!("{initial}/{label}/001"));
    };

    let parts: Vec<&str> = last.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let seq: u32 = parts[2].parse().ok()?;
    let next = seq.checked_add(1)?;
    Some(format!("{initial}/{label}/{next:03}"))
}
