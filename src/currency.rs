//! Supported currencies and their formatting locales

use crate::error::{FreelanceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency enumeration (ISO 4217 codes)
///
/// BRL is the entry currency: every hourly figure is typed in reais and
/// converted on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Brazilian Real
    #[default]
    BRL,
    /// US Dollar
    USD,
    /// Euro
    EUR,
}

/// Locale conventions used when rendering an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47 tag
    pub tag: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Symbol goes after the number (`1,00 €`) instead of before (`$1.00`)
    pub symbol_after: bool,
    /// Non-breaking space between symbol and number
    pub symbol_spaced: bool,
}

const PT_BR: Locale = Locale {
    tag: "pt-BR",
    decimal_separator: ',',
    group_separator: '.',
    symbol_after: false,
    symbol_spaced: true,
};

const EN_US: Locale = Locale {
    tag: "en-US",
    decimal_separator: '.',
    group_separator: ',',
    symbol_after: false,
    symbol_spaced: false,
};

const DE_DE: Locale = Locale {
    tag: "de-DE",
    decimal_separator: ',',
    group_separator: '.',
    symbol_after: true,
    symbol_spaced: true,
};

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Locale the currency is displayed in
    pub fn locale(&self) -> Locale {
        match self {
            Currency::BRL => PT_BR,
            Currency::USD => EN_US,
            Currency::EUR => DE_DE,
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }

    /// Get all supported currencies
    pub fn all() -> [Currency; 3] {
        [Currency::BRL, Currency::USD, Currency::EUR]
    }

    /// Currencies that need an exchange rate
    pub fn foreign() -> [Currency; 2] {
        [Currency::USD, Currency::EUR]
    }

    pub fn is_base(&self) -> bool {
        *self == Currency::BRL
    }
}

impl FromStr for Currency {
    type Err = FreelanceError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s).ok_or_else(|| FreelanceError::InvalidCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
