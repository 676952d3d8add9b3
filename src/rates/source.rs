//! Rate sources - where live rates come from

use crate::currency::Currency;
use crate::error::{FreelanceError, Result};
use hashbrown::HashMap;
use std::future::Future;

/// Public endpoint serving BRL-based rates
pub const DEFAULT_RATES_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";

/// Trait for external rate sources
///
/// A source answers one question: what does one unit of `base` buy in
/// every currency it knows about, keyed by ISO code.
pub trait RateSource: Send + Sync {
    /// Fetch rates based on `base`
    fn fetch_rates(
        &self,
        base: Currency,
    ) -> impl Future<Output = Result<HashMap<String, f64>>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Source that answers from memory
///
/// Handy for offline runs and tests; can also be set up to fail.
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    outcome: std::result::Result<HashMap<String, f64>, String>,
}

impl StaticRateSource {
    /// Source that returns `quotes`
    pub fn new<I, K>(quotes: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            outcome: Ok(quotes.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Source that always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl RateSource for StaticRateSource {
    async fn fetch_rates(&self, _base: Currency) -> Result<HashMap<String, f64>> {
        self.outcome
            .clone()
            .map_err(FreelanceError::RateFetch)
    }

    fn name(&self) -> &str {
        "static"
    }
}
