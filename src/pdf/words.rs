const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell a number with the Indian grouping (thousand, lakh, crore).
fn spell(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let mut out = TENS[(n / 10) as usize].to_string();
            if n % 10 != 0 {
                out.push(' ');
                out.push_str(ONES[(n % 10) as usize]);
            }
            out
        }
        100..=999 => join(spell(n / 100) + " Hundred", " and ", n % 100),
        1_000..=99_999 => join(spell(n / 1_000) + " Thousand", " ", n % 1_000),
        100_000..=9_999_999 => join(spell(n / 100_000) + " Lakh", " ", n % 100_000),
        _ => join(spell(n / 10_000_000) + " Crore", " ", n % 10_000_000),
    }
}

fn join(head: String, sep: &str, rest: u64) -> String {
    if rest == 0 {
        head
    } else {
        format!("{head}{sep}{}", spell(rest))
    }
}

/// Amount in words as printed under the invoice total, e.g.
/// "One Thousand Two Hundred and Fifty Rupees and Fifty Paise Only".
pub fn amount_in_words(amount: f64) -> String {
    let in_paise = (amount.max(0.0) * 100.0).round() as u64;
    let rupees = in_paise / 100;
    let paise = in_paise % 100;

    let mut words = if rupees == 0 {
        "Zero".to_string()
    } else {
        spell(rupees)
    };
    words.push_str(" Rupees");
    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&spell(paise));
        words.push_str(" Paise");
    }
    words.push_str(" Only");
    words
}
