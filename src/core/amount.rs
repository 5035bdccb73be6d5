//! Polish money formatting: two decimal places, comma decimal separator,
//! dot digit grouping (`1.234,56`).

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Round to two decimal places, half away from zero.
pub fn round_amount(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as `1.234,56`.
pub fn format_amount(d: Decimal) -> String {
    let rounded = round_amount(d);
    let s = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut out = String::with_capacity(s.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(frac_part);
    out
}

/// Parse an amount produced by [`format_amount`] back into a number.
///
/// Dots are treated as digit grouping and the comma as the decimal separator.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
