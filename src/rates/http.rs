//! HTTP exchange-rate source
//!
//! One GET to a public endpoint that serves BRL-based rates as JSON:
//!
//! ```json
//! { "base": "BRL", "rates": { "USD": 0.18, "EUR": 0.17, ... } }
//! ```

use super::source::{RateSource, DEFAULT_RATES_ENDPOINT};
use crate::currency::Currency;
use crate::error::{FreelanceError, Result};
use hashbrown::HashMap;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Exchange-rate source over HTTP (no API key required)
pub struct HttpRateSource {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

impl HttpRateSource {
    /// Create a source for the default endpoint
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_RATES_ENDPOINT)
    }

    /// Create a source for `endpoint`; the base code is appended as a path
    /// segment.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("rusty-freelance/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FreelanceError::RateFetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, base: Currency) -> String {
        format!("{}/{}", self.endpoint, base.code())
    }

    fn parse_rates(&self, body: &str) -> Result<HashMap<String, f64>> {
        let parsed: RatesResponse = serde_json::from_str(body)?;
        Ok(parsed.rates)
    }
}

impl RateSource for HttpRateSource {
    async fn fetch_rates(&self, base: Currency) -> Result<HashMap<String, f64>> {
        let url = self.url_for(base);
        log::debug!("Fetching {} rates from {}", base, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FreelanceError::RateFetch(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FreelanceError::RateFetch(format!(
                "Rate source returned error: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FreelanceError::RateFetch(format!("Failed to read response: {}", e)))?;

        self.parse_rates(&text)
    }

    fn name(&self) -> &str {
        "exchangerate-api"
    }
}
