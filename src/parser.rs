//! Free-form amount parsing
//!
//! Hourly price and cost are typed the Brazilian way, with a decimal comma
//! (`50,50`). Parsing never fails: anything that does not come out as a
//! finite number reads as zero, so a blank field and a typo both price at 0.

/// Parse a decimal-comma amount such as `"R$ 50,50"` or `"-10,00"`.
///
/// Everything except ASCII digits, `,` and `-` is dropped, then the first
/// comma becomes the decimal point. Thousands separators are not supported:
/// `"1.234,56"` reads as `1234.56` only because the dot is stripped, while
/// `"1,234,56"` is not a number and reads as `0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();

    let normalized = cleaned.replacen(',', ".", 1);
    finite_or_zero(normalized.parse::<f64>().ok())
}

/// Parse the free-text hours field.
///
/// Plain decimal notation with a dot, surrounding whitespace ignored.
/// Hours cannot be negative, so negative input reads as `0` like any other
/// invalid entry.
pub fn parse_hours(raw: &str) -> f64 {
    let hours = finite_or_zero(raw.trim().parse::<f64>().ok());
    if hours < 0.0 {
        0.0
    } else {
        hours
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        // -0.0 collapses to 0.0 as well
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}
