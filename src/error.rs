//! Error types for rusty_freelance

use crate::currency::Currency;
use thiserror::Error;

/// Main error type for rusty_freelance
#[derive(Error, Debug)]
pub enum FreelanceError {
    #[error("Exchange rate for {0} is not available yet")]
    RateUnavailable(Currency),

    #[error("Rate fetch failed: {0}")]
    RateFetch(String),

    #[error("Invalid rate for {currency}: {rate}")]
    InvalidRate { currency: Currency, rate: f64 },

    #[error("Unknown currency: {0}")]
    InvalidCurrency(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FreelanceError {
    /// True when the error only means "rates still loading or failed"
    pub fn is_rate_unavailable(&self) -> bool {
        matches!(self, FreelanceError::RateUnavailable(_))
    }
}

/// Result type alias for rusty_freelance operations
pub type Result<T> = std::result::Result<T, FreelanceError>;
