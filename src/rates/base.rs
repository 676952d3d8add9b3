//! Base rate system - RateTable and RateProvider trait

use crate::currency::Currency;
use crate::error::{FreelanceError, Result};
use crate::format::format_rate;
use chrono::{DateTime, Utc};
use hashbrown::HashMap;

/// Where a provider stands with its rates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateStatus {
    /// Fetch still outstanding; foreign rates unknown
    Loading,
    /// Rates known for the rest of the session
    Ready,
    /// Fetch failed; foreign rates stay unknown for the session
    Failed,
}

/// Conversion factors from BRL into each supported currency
///
/// A factor is the amount of target currency bought by 1 BRL, so
/// `target_amount = brl_amount * factor`. BRL itself is always 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<Currency, f64>,
    captured_at: DateTime<Utc>,
}

impl RateTable {
    /// Table for a flat rate where `brl_per_unit` reais buy one unit of
    /// every foreign currency.
    pub fn fixed(brl_per_unit: f64) -> Result<Self> {
        let mut rates = HashMap::new();
        for currency in Currency::foreign() {
            validate(currency, brl_per_unit)?;
            rates.insert(currency, 1.0 / brl_per_unit);
        }
        Ok(Self::with_rates(rates))
    }

    /// Build from BRL-based quotes keyed by ISO code (`{"USD": 0.2, ...}`).
    ///
    /// Every foreign currency must be present with a positive finite
    /// factor; anything else fails the whole table.
    pub fn from_quotes(quotes: &HashMap<String, f64>) -> Result<Self> {
        let mut rates = HashMap::new();
        for currency in Currency::foreign() {
            let rate = quotes
                .get(currency.code())
                .copied()
                .ok_or_else(|| {
                    FreelanceError::RateFetch(format!("response has no {} rate", currency))
                })?;
            validate(currency, rate)?;
            rates.insert(currency, rate);
        }
        Ok(Self::with_rates(rates))
    }

    /// Table over already-validated factors
    pub(super) fn with_rates(rates: HashMap<Currency, f64>) -> Self {
        Self {
            rates,
            captured_at: Utc::now(),
        }
    }

    /// Factor for `currency`; BRL is always 1
    pub fn get(&self, currency: Currency) -> Option<f64> {
        if currency.is_base() {
            return Some(1.0);
        }
        self.rates.get(&currency).copied()
    }

    /// When the table was built
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

fn validate(currency: Currency, rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(FreelanceError::InvalidRate { currency, rate })
    }
}

/// Trait for anything that can convert BRL into a target currency
pub trait RateProvider: Send + Sync {
    /// Factor such that `target_amount = brl_amount * rate`.
    ///
    /// BRL is always `Ok(1.0)`. An unknown rate is
    /// [`FreelanceError::RateUnavailable`], never a default value.
    fn rate(&self, target: Currency) -> Result<f64>;

    /// Current provider state
    fn status(&self) -> RateStatus;

    /// Check if a rate is available
    fn is_available(&self, target: Currency) -> bool {
        self.rate(target).is_ok()
    }

    /// Human-readable rate line, e.g. `1 USD = 5 BRL`
    fn notice(&self, target: Currency) -> Option<String> {
        if target.is_base() {
            return None;
        }
        let rate = self.rate(target).ok()?;
        Some(format!("1 {} = {} BRL", target, format_rate(1.0 / rate)))
    }
}

impl<P: RateProvider + ?Sized> RateProvider for std::sync::Arc<P> {
    fn rate(&self, target: Currency) -> Result<f64> {
        (**self).rate(target)
    }

    fn status(&self) -> RateStatus {
        (**self).status()
    }

    fn notice(&self, target: Currency) -> Option<String> {
        (**self).notice(target)
    }
}
