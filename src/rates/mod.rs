//! Exchange-rate system
//!
//! Converts BRL figures into USD or EUR.
//!
//! # Components
//!
//! - **base**: Core traits and types (RateTable, RateProvider)
//! - **fixed**: Hardcoded flat rate, always available
//! - **live**: Rates fetched once per session, unavailable until then
//! - **source**: Where live rates come from (RateSource)
//! - **http**: RateSource over a public JSON endpoint (feature `async`)
//!
//! # Example
//!
//! ```rust
//! use rusty_freelance::rates::{FixedRateProvider, RateProvider};
//! use rusty_freelance::currency::Currency;
//!
//! let provider = FixedRateProvider::new();
//! let usd = 1000.0 * provider.rate(Currency::USD).unwrap();
//! assert_eq!(usd, 200.0);
//! ```

pub mod base;
pub mod fixed;
#[cfg(feature = "async")]
pub mod http;
pub mod live;
pub mod source;

pub use base::{RateProvider, RateStatus, RateTable};
pub use fixed::{FixedRateProvider, FIXED_RATE};
#[cfg(feature = "async")]
pub use http::HttpRateSource;
pub use live::{LiveRateProvider, DEFAULT_FETCH_TIMEOUT};
pub use source::{RateSource, StaticRateSource, DEFAULT_RATES_ENDPOINT};
