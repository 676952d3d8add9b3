//! Fixed-rate provider
//!
//! Uses a hardcoded conversion constant instead of consulting any rate
//! source. Rates are always available.

use super::base::{RateProvider, RateStatus, RateTable};
use crate::currency::Currency;
use crate::error::{FreelanceError, Result};
use crate::format::format_rate;

/// Reais needed to buy one unit of USD or EUR
pub const FIXED_RATE: f64 = 5.0;

/// Fixed rate provider
///
/// # Example
/// ```
/// use rusty_freelance::rates::{FixedRateProvider, RateProvider};
/// use rusty_freelance::currency::Currency;
///
/// let provider = FixedRateProvider::new();
/// assert_eq!(provider.rate(Currency::BRL).unwrap(), 1.0);
/// assert_eq!(provider.rate(Currency::USD).unwrap(), 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct FixedRateProvider {
    brl_per_unit: f64,
    table: RateTable,
}

impl FixedRateProvider {
    /// Provider using [`FIXED_RATE`]
    pub fn new() -> Self {
        Self {
            brl_per_unit: FIXED_RATE,
            table: RateTable::with_rates(
                Currency::foreign()
                    .into_iter()
                    .map(|currency| (currency, 1.0 / FIXED_RATE))
                    .collect(),
            ),
        }
    }

    /// Provider for a custom flat rate
    pub fn with_rate(brl_per_unit: f64) -> Result<Self> {
        Ok(Self {
            brl_per_unit,
            table: RateTable::fixed(brl_per_unit)?,
        })
    }

    pub fn brl_per_unit(&self) -> f64 {
        self.brl_per_unit
    }
}

impl Default for FixedRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RateProvider for FixedRateProvider {
    fn rate(&self, target: Currency) -> Result<f64> {
        self.table
            .get(target)
            .ok_or(FreelanceError::RateUnavailable(target))
    }

    fn status(&self) -> RateStatus {
        RateStatus::Ready
    }

    fn notice(&self, target: Currency) -> Option<String> {
        if target.is_base() {
            return None;
        }
        Some(format!(
            "1 {} = {} BRL",
            target,
            format_rate(self.brl_per_unit)
        ))
    }
}
