//! Project price, cost and profit
//!
//! Hourly figures are entered in BRL. The calculator multiplies them by the
//! number of hours, converts the totals into the requested currency and
//! formats them. Every call recomputes from scratch; nothing is cached here.

use crate::currency::Currency;
use crate::error::Result;
use crate::format::format_currency;
use crate::parser::parse_amount;
use crate::rates::RateProvider;
use serde::{Deserialize, Serialize};

/// Snapshot of the form at the moment "calculate" is pressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Raw price-per-hour text, decimal comma
    pub price_per_hour: String,
    /// Raw cost-per-hour text, decimal comma
    pub cost_per_hour: String,
    pub hours: f64,
    pub currency: Currency,
}

impl ProjectInput {
    pub fn new(
        price_per_hour: impl Into<String>,
        cost_per_hour: impl Into<String>,
        hours: f64,
        currency: Currency,
    ) -> Self {
        Self {
            price_per_hour: price_per_hour.into(),
            cost_per_hour: cost_per_hour.into(),
            hours,
            currency,
        }
    }
}

/// Price, cost and profit of a project
///
/// `profit` is always `price - cost`, in whatever currency the figures are
/// expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectFigures {
    pub price: f64,
    pub cost: f64,
    pub profit: f64,
}

impl ProjectFigures {
    /// Totals for `hours` of work at the given hourly price and cost
    pub fn from_hourly(price_per_hour: f64, cost_per_hour: f64, hours: f64) -> Self {
        let hours = sanitize_hours(hours);
        let price = price_per_hour * hours;
        let cost = cost_per_hour * hours;
        Self {
            price,
            cost,
            profit: price - cost,
        }
    }

    /// Same figures multiplied by `rate`
    pub fn convert(&self, rate: f64) -> Self {
        Self {
            price: self.price * rate,
            cost: self.cost * rate,
            profit: self.profit * rate,
        }
    }

    /// Profit as a fraction of price, `None` when there is no price
    pub fn margin(&self) -> Option<f64> {
        if self.price == 0.0 {
            None
        } else {
            Some(self.profit / self.price)
        }
    }
}

fn sanitize_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}

/// Figures converted and rendered for one currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub currency: Currency,
    /// Factor applied to the BRL figures
    pub rate: f64,
    /// Figures in `currency`
    pub figures: ProjectFigures,
    pub price: String,
    pub cost: String,
    pub profit: String,
    /// Rate line worth showing to the user, e.g. `1 USD = 5 BRL`
    pub notice: Option<String>,
}

impl Quote {
    fn new(brl: &ProjectFigures, currency: Currency, rate: f64, notice: Option<String>) -> Self {
        let figures = brl.convert(rate);
        Self {
            currency,
            rate,
            figures,
            price: format_currency(figures.price, currency),
            cost: format_currency(figures.cost, currency),
            profit: format_currency(figures.profit, currency),
            notice,
        }
    }
}

/// Calculator bound to a rate provider
pub struct ProjectCalculator<'a, P: RateProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: RateProvider + ?Sized> ProjectCalculator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Figures in BRL, before any conversion
    pub fn figures(&self, input: &ProjectInput) -> ProjectFigures {
        ProjectFigures::from_hourly(
            parse_amount(&input.price_per_hour),
            parse_amount(&input.cost_per_hour),
            input.hours,
        )
    }

    /// Compute, convert and format a quote.
    ///
    /// Fails with `RateUnavailable` when a foreign currency is asked for and
    /// the provider has no rate yet; callers should report that rates are
    /// still loading instead of showing zeros.
    pub fn compute(&self, input: &ProjectInput) -> Result<Quote> {
        let brl = self.figures(input);
        let rate = self.provider.rate(input.currency)?;

        log::debug!(
            "Computed {:?} BRL for {} hours, converting to {} at {}",
            brl,
            input.hours,
            input.currency,
            rate
        );

        Ok(Quote::new(
            &brl,
            input.currency,
            rate,
            self.provider.notice(input.currency),
        ))
    }
}

/// One-call form of [`ProjectCalculator::compute`]
///
/// # Example
/// ```
/// use rusty_freelance::calculator::compute;
/// use rusty_freelance::currency::Currency;
/// use rusty_freelance::rates::FixedRateProvider;
///
/// let quote = compute("100", "50", 10.0, Currency::USD, &FixedRateProvider::new()).unwrap();
/// assert_eq!(quote.price, "$200.00");
/// assert_eq!(quote.cost, "$100.00");
/// assert_eq!(quote.profit, "$100.00");
/// ```
pub fn compute<P: RateProvider + ?Sized>(
    price_raw: &str,
    cost_raw: &str,
    hours: f64,
    currency: Currency,
    provider: &P,
) -> Result<Quote> {
    let input = ProjectInput::new(price_raw, cost_raw, hours, currency);
    ProjectCalculator::new(provider).compute(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{FixedRateProvider, LiveRateProvider, RateTable};
    use approx::assert_relative_eq;

    #[test]
    fn test_figures_from_hourly() {
        let figures = ProjectFigures::from_hourly(100.0, 50.0, 10.0);
        assert_relative_eq!(figures.price, 1000.0);
        assert_relative_eq!(figures.cost, 500.0);
        assert_relative_eq!(figures.profit, 500.0);
    }

    #[test]
    fn test_invalid_hours_are_zero() {
        for hours in [-5.0, f64::NAN, f64::INFINITY] {
            let figures = ProjectFigures::from_hourly(100.0, 50.0, hours);
            assert_eq!(figures.price, 0.0);
            assert_eq!(figures.cost, 0.0);
            assert_eq!(figures.profit, 0.0);
        }
    }

    #[test]
    fn test_negative_profit() {
        let figures = ProjectFigures::from_hourly(30.0, 45.5, 2.0);
        assert_relative_eq!(figures.profit, -31.0);
        assert_relative_eq!(figures.margin().unwrap(), -31.0 / 60.0);
    }

    #[test]
    fn test_margin_without_price() {
        assert_eq!(ProjectFigures::from_hourly(0.0, 10.0, 5.0).margin(), None);
    }

    #[test]
    fn test_compute_brl() {
        let quote = compute("50,50", "15,50", 10.0, Currency::BRL, &FixedRateProvider::new()).unwrap();

        assert_eq!(quote.rate, 1.0);
        assert_eq!(quote.price, "R$\u{a0}505,00");
        assert_eq!(quote.cost, "R$\u{a0}155,00");
        assert_eq!(quote.profit, "R$\u{a0}350,00");
        assert!(quote.notice.is_none());
    }

    #[test]
    fn test_compute_fixed_usd() {
        let quote = compute("100", "50", 10.0, Currency::USD, &FixedRateProvider::new()).unwrap();

        assert_relative_eq!(quote.figures.price, 200.0);
        assert_relative_eq!(quote.figures.cost, 100.0);
        assert_relative_eq!(quote.figures.profit, 100.0);
        assert_eq!(quote.notice.as_deref(), Some("1 USD = 5 BRL"));
    }

    #[test]
    fn test_compute_fixed_eur() {
        let quote = compute("100", "50", 10.0, Currency::EUR, &FixedRateProvider::new()).unwrap();
        assert_eq!(quote.price, "200,00\u{a0}€");
        assert_eq!(quote.profit, "100,00\u{a0}€");
    }

    #[test]
    fn test_compute_unavailable_while_loading() {
        let provider = LiveRateProvider::new();
        let err = compute("100", "50", 10.0, Currency::USD, &provider).unwrap_err();
        assert!(err.is_rate_unavailable());

        // BRL does not need a rate
        assert!(compute("100", "50", 10.0, Currency::BRL, &provider).is_ok());
    }

    #[test]
    fn test_compute_live_rate() {
        let provider = LiveRateProvider::new();
        provider.resolve(RateTable::fixed(4.0));

        let quote = compute("100", "50", 10.0, Currency::USD, &provider).unwrap();
        assert_relative_eq!(quote.figures.price, 250.0);
        assert_eq!(quote.price, "$250.00");
    }

    #[test]
    fn test_compute_invalid_input_prices_at_zero() {
        let quote = compute("abc", "", 10.0, Currency::BRL, &FixedRateProvider::new()).unwrap();
        assert_eq!(quote.price, "R$\u{a0}0,00");
        assert_eq!(quote.profit, "R$\u{a0}0,00");
    }

    #[test]
    fn test_compute_is_idempotent() {
        let provider = FixedRateProvider::new();
        let input = ProjectInput::new("50,50", "15,50", 37.0, Currency::EUR);
        let calculator = ProjectCalculator::new(&provider);

        assert_eq!(calculator.compute(&input).unwrap(), calculator.compute(&input).unwrap());
    }
}
