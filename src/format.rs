//! Locale-aware currency rendering
//!
//! Each supported currency is shown in one fixed locale:
//!
//! | Currency | Locale | Example          |
//! |----------|--------|------------------|
//! | BRL      | pt-BR  | `R$ 1.234,50`    |
//! | USD      | en-US  | `$1,234.50`      |
//! | EUR      | de-DE  | `1.234,50 €`     |
//!
//! The space between number and symbol is a non-breaking space (U+00A0).

use crate::currency::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const NBSP: char = '\u{a0}';

/// Below this every amount rounds to zero cents
const HALF_CENT: f64 = 0.005;

/// From 2^53 up every `f64` is a whole number
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Render `amount` as a currency string for `currency`.
///
/// Rounds to two fractional digits, half away from zero, applied to the
/// amount as written in decimal (`1.005` becomes `1.01`). Any negative
/// input keeps its minus sign, even when it rounds to zero (`-0.004`
/// renders as `-$0.00`).
///
/// # Example
/// ```
/// use rusty_freelance::format::format_currency;
/// use rusty_freelance::currency::Currency;
///
/// assert_eq!(format_currency(1234.5, Currency::USD), "$1,234.50");
/// assert_eq!(format_currency(1234.5, Currency::BRL), "R$\u{a0}1.234,50");
/// ```
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let locale = currency.locale();

    let number = if amount.is_nan() {
        "NaN".to_string()
    } else {
        match rounded_cents(amount.abs()) {
            Some(cents) => group_digits(&cents, locale.decimal_separator, locale.group_separator),
            None => "∞".to_string(),
        }
    };

    let sign = if !amount.is_nan() && amount.is_sign_negative() {
        "-"
    } else {
        ""
    };
    let gap = if locale.symbol_spaced {
        NBSP.to_string()
    } else {
        String::new()
    };

    if locale.symbol_after {
        format!("{}{}{}{}", sign, number, gap, currency.symbol())
    } else {
        format!("{}{}{}{}", sign, currency.symbol(), gap, number)
    }
}

/// Render an exchange rate with up to four decimals, trailing zeros dropped.
pub fn format_rate(rate: f64) -> String {
    let text = format!("{:.4}", rate);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Whole number of cents as decimal digits, at least three long.
///
/// Rounding works on the shortest decimal text of `abs`, not on its binary
/// value: `1.005_f64` is stored as `1.00499999...` but reads as `1.005`.
fn rounded_cents(abs: f64) -> Option<String> {
    if !abs.is_finite() {
        return None;
    }
    if abs < HALF_CENT {
        return Some("000".to_string());
    }
    if abs >= EXACT_INTEGER_LIMIT {
        return Some(format!("{:.0}00", abs));
    }

    let cents = match Decimal::from_str(&abs.to_string()) {
        Ok(value) => {
            let mut rounded =
                value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.mantissa()
        }
        Err(e) => {
            log::debug!("{} has no decimal form ({}), rounding in binary", abs, e);
            (abs * 100.0).round() as i128
        }
    };
    Some(format!("{:03}", cents))
}

fn group_digits(cents: &str, decimal: char, group: char) -> String {
    let (int_part, frac_part) = cents.split_at(cents.len() - 2);

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(digit);
    }

    grouped.push(decimal);
    grouped.push_str(frac_part);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_currency(1234.5, Currency::BRL), "R$\u{a0}1.234,50");
        assert_eq!(format_currency(0.0, Currency::BRL), "R$\u{a0}0,00");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_currency(1234.5, Currency::USD), "$1,234.50");
        assert_eq!(format_currency(200.0, Currency::USD), "$200.00");
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_currency(1234.5, Currency::EUR), "1.234,50\u{a0}€");
        assert_eq!(format_currency(7.0, Currency::EUR), "7,00\u{a0}€");
    }

    #[test]
    fn test_format_grouping() {
        assert_eq!(format_currency(1_234_567.891, Currency::USD), "$1,234,567.89");
        assert_eq!(format_currency(999.999, Currency::USD), "$1,000.00");
        assert_eq!(format_currency(100_000.0, Currency::BRL), "R$\u{a0}100.000,00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(-350.0, Currency::USD), "-$350.00");
        assert_eq!(format_currency(-350.0, Currency::BRL), "-R$\u{a0}350,00");
        assert_eq!(format_currency(-350.0, Currency::EUR), "-350,00\u{a0}€");
    }

    #[test]
    fn test_format_rounding() {
        assert_eq!(format_currency(0.125, Currency::USD), "$0.13");
        assert_eq!(format_currency(0.004, Currency::USD), "$0.00");
        assert_eq!(format_currency(0.005, Currency::USD), "$0.01");
        assert_eq!(format_currency(0.05, Currency::USD), "$0.05");
    }

    #[test]
    fn test_format_rounds_decimal_midpoints_up() {
        // all three sit just below the midpoint in binary
        assert_eq!(format_currency(1.005, Currency::USD), "$1.01");
        assert_eq!(format_currency(1.015, Currency::USD), "$1.02");
        assert_eq!(format_currency(0.145, Currency::BRL), "R$\u{a0}0,15");
        assert_eq!(format_currency(-1.005, Currency::EUR), "-1,01\u{a0}€");
        assert_eq!(format_currency(1.0049, Currency::USD), "$1.00");
    }

    #[test]
    fn test_format_huge_amounts() {
        assert_eq!(format_currency(1e16, Currency::USD), "$10,000,000,000,000,000.00");
        assert_eq!(
            format_currency(123_456_789_012.345, Currency::BRL),
            "R$\u{a0}123.456.789.012,35"
        );
    }

    #[test]
    fn test_format_negative_rounding_to_zero_keeps_sign() {
        assert_eq!(format_currency(-0.004, Currency::USD), "-$0.00");
        assert_eq!(format_currency(-0.0, Currency::BRL), "-R$\u{a0}0,00");
        assert_eq!(format_currency(0.0, Currency::BRL), "R$\u{a0}0,00");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_currency(f64::NAN, Currency::USD), "$NaN");
        assert_eq!(format_currency(f64::INFINITY, Currency::EUR), "∞\u{a0}€");
        assert_eq!(format_currency(f64::NEG_INFINITY, Currency::USD), "-$∞");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(5.0), "5");
        assert_eq!(format_rate(0.2), "0.2");
        assert_eq!(format_rate(5.4321987), "5.4322");
    }
}
