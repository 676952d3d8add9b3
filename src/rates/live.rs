//! Live rate provider
//!
//! Rates are fetched once at session start and held for the rest of the
//! session. The provider starts out `Loading`; the first resolution wins and
//! moves it to `Ready` or `Failed` for good. There is no retry: a failed
//! fetch leaves foreign rates unavailable until the process restarts.
//!
//! # Example
//! ```
//! use rusty_freelance::rates::{LiveRateProvider, RateProvider, RateStatus, RateTable};
//! use rusty_freelance::currency::Currency;
//!
//! let provider = LiveRateProvider::new();
//! assert_eq!(provider.status(), RateStatus::Loading);
//! assert!(provider.rate(Currency::USD).is_err());
//! assert_eq!(provider.rate(Currency::BRL).unwrap(), 1.0);
//!
//! provider.resolve(RateTable::fixed(5.0));
//! assert_eq!(provider.status(), RateStatus::Ready);
//! assert_eq!(provider.rate(Currency::USD).unwrap(), 0.2);
//! ```

use super::base::{RateProvider, RateStatus, RateTable};
use crate::currency::Currency;
use crate::error::{FreelanceError, Result};
use chrono::{DateTime, Utc};
use std::sync::OnceLock;

#[cfg(feature = "async")]
use super::source::RateSource;
#[cfg(feature = "async")]
use std::sync::Arc;
#[cfg(feature = "async")]
use std::time::Duration;

/// Upper bound on the startup fetch
pub const DEFAULT_FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

#[derive(Debug)]
enum Resolution {
    Ready(RateTable),
    Failed(String),
}

/// Rate provider backed by a one-shot fetch
#[derive(Debug, Default)]
pub struct LiveRateProvider {
    resolution: OnceLock<Resolution>,
    #[cfg(feature = "async")]
    resolved: tokio::sync::Notify,
}

impl LiveRateProvider {
    /// Create a provider with no rates yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of the fetch.
    ///
    /// Returns `true` if this call settled the provider. Later calls are
    /// ignored, so the table is written at most once.
    pub fn resolve(&self, outcome: Result<RateTable>) -> bool {
        let resolution = match outcome {
            Ok(table) => {
                log::info!(
                    "Live rates loaded at {}: USD {:?}, EUR {:?}",
                    table.captured_at().to_rfc3339(),
                    table.get(Currency::USD),
                    table.get(Currency::EUR)
                );
                Resolution::Ready(table)
            }
            Err(e) => {
                log::warn!("Live rate fetch failed, foreign currencies unavailable: {}", e);
                Resolution::Failed(e.to_string())
            }
        };

        let settled = self.resolution.set(resolution).is_ok();
        if settled {
            #[cfg(feature = "async")]
            self.resolved.notify_waiters();
        } else {
            log::warn!("Live rates already resolved, ignoring later outcome");
        }
        settled
    }

    /// Rates, once loaded
    pub fn table(&self) -> Option<&RateTable> {
        match self.resolution.get() {
            Some(Resolution::Ready(table)) => Some(table),
            _ => None,
        }
    }

    /// When the loaded rates were captured
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.table().map(RateTable::captured_at)
    }

    /// Failure message, if the fetch failed
    pub fn failure(&self) -> Option<&str> {
        match self.resolution.get() {
            Some(Resolution::Failed(message)) => Some(message),
            _ => None,
        }
    }
}

#[cfg(feature = "async")]
impl LiveRateProvider {
    /// Fetch BRL-based rates from `source` once, bounded by `timeout`.
    ///
    /// A timeout counts as a failed fetch. Returns `true` if this call
    /// settled the provider.
    pub async fn initialize<S: RateSource>(&self, source: &S, timeout: Duration) -> bool {
        log::debug!("Fetching live rates from {}", source.name());

        let outcome = match tokio::time::timeout(timeout, source.fetch_rates(Currency::BRL)).await
        {
            Ok(Ok(quotes)) => RateTable::from_quotes(&quotes),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FreelanceError::RateFetch(format!(
                "{} did not answer within {:?}",
                source.name(),
                timeout
            ))),
        };

        self.resolve(outcome)
    }

    /// Start the fetch in the background and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(source: S, timeout: Duration) -> Arc<Self>
    where
        S: RateSource + 'static,
    {
        let provider = Arc::new(Self::new());
        let handle = Arc::clone(&provider);
        tokio::spawn(async move {
            handle.initialize(&source, timeout).await;
        });
        provider
    }

    /// Wait until the fetch has settled one way or the other
    pub async fn wait_resolved(&self) -> RateStatus {
        loop {
            let notified = self.resolved.notified();
            if self.resolution.get().is_some() {
                return self.status();
            }
            notified.await;
        }
    }
}

impl RateProvider for LiveRateProvider {
    fn rate(&self, target: Currency) -> Result<f64> {
        if target.is_base() {
            return Ok(1.0);
        }
        self.table()
            .and_then(|table| table.get(target))
            .ok_or(FreelanceError::RateUnavailable(target))
    }

    fn status(&self) -> RateStatus {
        match self.resolution.get() {
            None => RateStatus::Loading,
            Some(Resolution::Ready(_)) => RateStatus::Ready,
            Some(Resolution::Failed(_)) => RateStatus::Failed,
        }
    }
}
