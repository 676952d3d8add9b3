//! Front-end configuration
//!
//! Read from TOML, every key optional:
//!
//! ```toml
//! default_currency = "USD"
//! rate_mode = "live"
//! fixed_rate = 5.0
//! rates_endpoint = "https://api.exchangerate-api.com/v4/latest"
//! fetch_timeout_secs = 5
//! hours_mode = "slider"
//! ```

use crate::currency::Currency;
use crate::error::{FreelanceError, Result};
use crate::form::HoursMode;
use crate::rates::{
    FixedRateProvider, DEFAULT_FETCH_TIMEOUT, DEFAULT_RATES_ENDPOINT, FIXED_RATE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How conversion rates are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateMode {
    #[default]
    Fixed,
    Live,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_currency: Currency,
    pub rate_mode: RateMode,
    /// Reais per unit of foreign currency in fixed mode
    pub fixed_rate: f64,
    pub rates_endpoint: String,
    pub fetch_timeout_secs: u64,
    pub hours_mode: HoursMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: Currency::BRL,
            rate_mode: RateMode::Fixed,
            fixed_rate: FIXED_RATE,
            rates_endpoint: DEFAULT_RATES_ENDPOINT.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
            hours_mode: HoursMode::Text,
        }
    }
}

impl Config {
    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| FreelanceError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if it exists, falling back to defaults with a warning
    /// when it cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.exists() => match Self::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to load config {}: {}", path.display(), e);
                    Config::default()
                }
            },
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Config::default()
            }
            None => Config::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_rate.is_finite() && self.fixed_rate > 0.0) {
            return Err(FreelanceError::ConfigError(format!(
                "fixed_rate must be positive, got {}",
                self.fixed_rate
            )));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(FreelanceError::ConfigError(
                "fetch_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.rates_endpoint.trim().is_empty() {
            return Err(FreelanceError::ConfigError(
                "rates_endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn fixed_provider(&self) -> Result<FixedRateProvider> {
        FixedRateProvider::with_rate(self.fixed_rate)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FreelanceError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_currency, Currency::BRL);
        assert_eq!(config.rate_mode, RateMode::Fixed);
        assert_eq!(config.fixed_rate, 5.0);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            default_currency = "EUR"
            rate_mode = "live"
            hours_mode = "slider"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_currency, Currency::EUR);
        assert_eq!(config.rate_mode, RateMode::Live);
        assert_eq!(config.hours_mode, HoursMode::Slider);
        assert_eq!(config.fixed_rate, 5.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_toml_str("fixed_rate = 0.0").is_err());
        assert!(Config::from_toml_str("fetch_timeout_secs = 0").is_err());
        assert!(Config::from_toml_str("rate_mode = \"sometimes\"").is_err());
        assert!(Config::from_toml_str("default_currency = \"GBP\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            default_currency: Currency::USD,
            rate_mode: RateMode::Live,
            fixed_rate: 5.25,
            ..Config::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fixed_rate = 4.5").unwrap();

        let config = Config::load(Some(file.path()));
        assert_eq!(config.fixed_rate, 4.5);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fixed_rate = \"five\"").unwrap();
        assert_eq!(Config::load(Some(file.path())), Config::default());

        let missing = Path::new("/nonexistent/rusty-freelance/config.toml");
        assert_eq!(Config::load(Some(missing)), Config::default());
        assert_eq!(Config::load(None), Config::default());
    }
}
