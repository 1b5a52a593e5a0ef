//! Financial totals: derive tax and net-payable amounts, format currency.
//!
//! The caller supplies the pre-tax aggregate and the tax rate; this module
//! only derives the two downstream amounts. It deliberately does not sum
//! the line items — the caller's aggregate is authoritative and the per-line
//! totals are display-only.
//!
//! ## Currency format
//!
//! Amounts reproduce the French-locale EUR rendering the downstream golden
//! files expect: two decimals, comma decimal separator, thousands grouped
//! with U+202F NARROW NO-BREAK SPACE, and a U+00A0 NO-BREAK SPACE before the
//! euro sign — `1 234,50 €` byte-for-byte as emitted by
//! `Intl.NumberFormat('fr-FR', {style: 'currency', currency: 'EUR'})`.

/// Derived amounts for one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Caller-supplied pre-tax aggregate, echoed for display.
    pub pretax: f64,
    /// Tax rate in percent, echoed for the `TVA (<rate>%)` label.
    pub rate: f64,
    /// `pretax * rate / 100`.
    pub tax_amount: f64,
    /// `pretax + tax_amount` — the net payable.
    pub grand_total: f64,
}

/// Compute tax amount and grand total from the caller-supplied aggregate.
pub fn compute_totals(pretax: f64, rate: f64) -> Totals {
    let tax_amount = pretax * rate / 100.0;
    Totals {
        pretax,
        rate,
        tax_amount,
        grand_total: pretax + tax_amount,
    }
}

/// Thousands group separator (U+202F NARROW NO-BREAK SPACE).
const GROUP_SEP: char = '\u{202f}';
/// Separator between the amount and the euro sign (U+00A0 NO-BREAK SPACE).
const SIGN_SEP: char = '\u{a0}';

/// Format an amount as French-locale EUR, e.g. `1 234,50 €`.
///
/// Rounds to the nearest cent (half away from zero); non-finite inputs
/// format as zero so a bad payload still yields a readable document.
pub fn format_eur(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let fraction = cents % 100;

    // Group the integer digits in threes from the right.
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 8);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(GROUP_SEP);
        }
        grouped.push(ch);
    }

    format!(
        "{}{grouped},{fraction:02}{SIGN_SEP}€",
        if negative { "-" } else { "" }
    )
}

/// Format the tax rate for the `TVA (<rate>%)` label: integer rates drop
/// the fraction, others print as-is (`5.5` → `5.5`).
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 && rate.abs() < 1e15 {
        format!("{}", rate as i64)
    } else {
        format!("{rate}")
    }
}
