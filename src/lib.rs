//! # rusty_freelance
//!
//! Estimate a freelance project's price, cost and net profit from an hourly
//! rate, an hourly cost and a number of hours, in BRL, USD or EUR.
//!
//! Hourly figures are entered in BRL with a decimal comma. Conversion uses
//! either a fixed rate (5 BRL per unit) or live rates fetched once per
//! session; while live rates are loading, foreign-currency quotes are
//! unavailable rather than zero.
//!
//! ## Example
//!
//! ```rust
//! use rusty_freelance::prelude::*;
//!
//! let provider = FixedRateProvider::new();
//! let input = ProjectInput::new("100", "50", 10.0, Currency::USD);
//! let quote = ProjectCalculator::new(&provider).compute(&input).unwrap();
//!
//! assert_eq!(quote.price, "$200.00");
//! assert_eq!(quote.profit, "$100.00");
//! ```

pub mod calculator;
pub mod config;
pub mod currency;
pub mod error;
pub mod form;
pub mod format;
pub mod parser;
pub mod rates;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::calculator::{compute, ProjectCalculator, ProjectFigures, ProjectInput, Quote};
    pub use crate::currency::Currency;
    pub use crate::error::{FreelanceError, Result};
    pub use crate::form::{FormStatus, HoursField, HoursMode, ProjectForm};
    pub use crate::format::format_currency;
    pub use crate::parser::{parse_amount, parse_hours};
    pub use crate::rates::{
        FixedRateProvider, LiveRateProvider, RateProvider, RateStatus, RateTable,
    };
}
