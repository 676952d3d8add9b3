//! Form state
//!
//! The form owns everything mutable: field text, hours, selected currency
//! and the last results shown. On every calculate action it hands an
//! immutable [`ProjectInput`] to the calculator and stores what comes back.
//! Rendering is left to whatever front-end drives it.

use crate::calculator::{ProjectCalculator, ProjectInput, Quote};
use crate::currency::Currency;
use crate::error::Result;
use crate::parser::parse_hours;
use crate::rates::RateProvider;
use serde::{Deserialize, Serialize};

/// Lowest value the hours slider accepts
pub const MIN_SLIDER_HOURS: u32 = 1;
/// Highest value the hours slider accepts
pub const MAX_SLIDER_HOURS: u32 = 160;
/// Where the slider starts
pub const DEFAULT_SLIDER_HOURS: u32 = 40;

pub const DEFAULT_PRICE_PER_HOUR: &str = "50,50";
pub const DEFAULT_COST_PER_HOUR: &str = "15,50";

/// Which hours widget the form uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HoursMode {
    #[default]
    Text,
    Slider,
}

/// Hours input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoursField {
    /// Free numeric text; anything unparseable counts as zero hours
    Text(String),
    /// Whole hours within `MIN_SLIDER_HOURS..=MAX_SLIDER_HOURS`
    Slider(u32),
}

impl HoursField {
    pub fn for_mode(mode: HoursMode) -> Self {
        match mode {
            HoursMode::Text => HoursField::Text(String::new()),
            HoursMode::Slider => HoursField::Slider(DEFAULT_SLIDER_HOURS),
        }
    }

    /// Commit a new value.
    ///
    /// Text always takes the new value. The slider only takes whole numbers
    /// within range; anything else is dropped and the previous value stays,
    /// in which case `false` is returned.
    pub fn set(&mut self, raw: &str) -> bool {
        match self {
            HoursField::Text(text) => {
                *text = raw.to_string();
                true
            }
            HoursField::Slider(current) => match raw.trim().parse::<u32>() {
                Ok(value) if (MIN_SLIDER_HOURS..=MAX_SLIDER_HOURS).contains(&value) => {
                    *current = value;
                    true
                }
                _ => {
                    log::debug!("Ignoring out-of-range slider hours {:?}", raw);
                    false
                }
            },
        }
    }

    /// Hours as a number
    pub fn hours(&self) -> f64 {
        match self {
            HoursField::Text(text) => parse_hours(text),
            HoursField::Slider(value) => f64::from(*value),
        }
    }
}

/// Outcome of a calculate action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// Nothing calculated yet
    Idle,
    /// Results reflect the current inputs
    Calculated,
    /// Selected currency has no rate yet; results show the loading
    /// placeholder
    RatesLoading,
}

/// Shown in every result field while rates for the selection are loading
pub const LOADING_PLACEHOLDER: &str = "...";

/// Result fields shown to the user
///
/// `currency` is the currency the figures are in, `None` while nothing has
/// been calculated for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedResults {
    pub currency: Option<Currency>,
    pub project_price: String,
    pub project_cost: String,
    pub net_profit: String,
}

impl DisplayedResults {
    fn filled_with(text: &str) -> Self {
        Self {
            currency: None,
            project_price: text.to_string(),
            project_cost: text.to_string(),
            net_profit: text.to_string(),
        }
    }

    /// Placeholder results while rates load
    pub fn loading() -> Self {
        Self::filled_with(LOADING_PLACEHOLDER)
    }

    pub fn is_loading(&self) -> bool {
        self == &Self::loading()
    }
}

impl Default for DisplayedResults {
    fn default() -> Self {
        Self::filled_with("0")
    }
}

/// Project estimator form
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub price_per_hour: String,
    pub cost_per_hour: String,
    hours: HoursField,
    currency: Currency,
    results: DisplayedResults,
    status: FormStatus,
    notice: Option<String>,
}

impl ProjectForm {
    /// Form with the stock defaults and the given hours widget
    pub fn new(mode: HoursMode) -> Self {
        Self {
            price_per_hour: DEFAULT_PRICE_PER_HOUR.to_string(),
            cost_per_hour: DEFAULT_COST_PER_HOUR.to_string(),
            hours: HoursField::for_mode(mode),
            currency: Currency::BRL,
            results: DisplayedResults::default(),
            status: FormStatus::Idle,
            notice: None,
        }
    }

    /// Set hours; see [`HoursField::set`]
    pub fn set_hours(&mut self, raw: &str) -> bool {
        self.hours.set(raw)
    }

    pub fn hours(&self) -> &HoursField {
        &self.hours
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn results(&self) -> &DisplayedResults {
        &self.results
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Rate line from the last successful calculation, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Immutable view of the current inputs
    pub fn snapshot(&self) -> ProjectInput {
        ProjectInput::new(
            self.price_per_hour.clone(),
            self.cost_per_hour.clone(),
            self.hours.hours(),
            self.currency,
        )
    }

    /// False while the selected currency has no rate; the calculate action
    /// should be disabled then.
    pub fn can_calculate<P: RateProvider + ?Sized>(&self, provider: &P) -> bool {
        provider.is_available(self.currency)
    }

    /// Recompute and update the displayed results
    pub fn calculate<P: RateProvider + ?Sized>(&mut self, provider: &P) -> Result<FormStatus> {
        match ProjectCalculator::new(provider).compute(&self.snapshot()) {
            Ok(quote) => {
                self.show(quote);
                self.status = FormStatus::Calculated;
            }
            Err(e) if e.is_rate_unavailable() => {
                log::info!("{}; waiting for rates", e);
                if self.results.currency != Some(self.currency) {
                    self.results = DisplayedResults::loading();
                }
                self.notice = None;
                self.status = FormStatus::RatesLoading;
            }
            Err(e) => return Err(e),
        }
        Ok(self.status)
    }

    /// Switch currency and recalculate straight away, so the results never
    /// show figures in a currency other than the selected one.
    pub fn select_currency<P: RateProvider + ?Sized>(
        &mut self,
        currency: Currency,
        provider: &P,
    ) -> Result<FormStatus> {
        self.currency = currency;
        self.calculate(provider)
    }

    fn show(&mut self, quote: Quote) {
        self.results = DisplayedResults {
            currency: Some(quote.currency),
            project_price: quote.price,
            project_cost: quote.cost,
            net_profit: quote.profit,
        };
        self.notice = quote.notice;
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new(HoursMode::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{FixedRateProvider, LiveRateProvider, RateTable};

    #[test]
    fn test_defaults() {
        let form = ProjectForm::default();
        assert_eq!(form.price_per_hour, "50,50");
        assert_eq!(form.cost_per_hour, "15,50");
        assert_eq!(form.hours(), &HoursField::Text(String::new()));
        assert_eq!(form.currency(), Currency::BRL);
        assert_eq!(form.results().project_price, "0");
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn test_slider_clamp_ignores_out_of_range() {
        let mut field = HoursField::Slider(10);
        assert!(!field.set("0"));
        assert_eq!(field, HoursField::Slider(10));
        assert!(!field.set("161"));
        assert_eq!(field, HoursField::Slider(10));
        assert!(!field.set("abc"));
        assert!(!field.set("-3"));
        assert_eq!(field, HoursField::Slider(10));

        assert!(field.set("1"));
        assert!(field.set("160"));
        assert_eq!(field, HoursField::Slider(160));
    }

    #[test]
    fn test_text_hours_accept_anything() {
        let mut field = HoursField::Text(String::new());
        assert!(field.set("abc"));
        assert_eq!(field.hours(), 0.0);
        assert!(field.set("12"));
        assert_eq!(field.hours(), 12.0);
    }

    #[test]
    fn test_calculate_with_empty_hours() {
        let mut form = ProjectForm::default();
        let status = form.calculate(&FixedRateProvider::new()).unwrap();

        assert_eq!(status, FormStatus::Calculated);
        assert_eq!(form.results().project_price, "R$\u{a0}0,00");
        assert_eq!(form.results().net_profit, "R$\u{a0}0,00");
    }

    #[test]
    fn test_calculate_slider() {
        let mut form = ProjectForm::new(HoursMode::Slider);
        assert!(form.set_hours("10"));
        form.calculate(&FixedRateProvider::new()).unwrap();

        assert_eq!(form.results().project_price, "R$\u{a0}505,00");
        assert_eq!(form.results().project_cost, "R$\u{a0}155,00");
        assert_eq!(form.results().net_profit, "R$\u{a0}350,00");
    }

    #[test]
    fn test_select_currency_recalculates() {
        let provider = FixedRateProvider::new();
        let mut form = ProjectForm::default();
        form.price_per_hour = "100".to_string();
        form.cost_per_hour = "50".to_string();
        form.set_hours("10");
        form.calculate(&provider).unwrap();
        assert_eq!(form.results().project_price, "R$\u{a0}1.000,00");

        form.select_currency(Currency::USD, &provider).unwrap();
        assert_eq!(form.results().project_price, "$200.00");
        assert_eq!(form.notice(), Some("1 USD = 5 BRL"));
    }

    #[test]
    fn test_rates_loading_never_shows_other_currency() {
        let provider = LiveRateProvider::new();
        let mut form = ProjectForm::default();
        form.set_hours("10");
        form.calculate(&provider).unwrap();
        assert_eq!(form.results().currency, Some(Currency::BRL));
        assert_eq!(form.results().project_price, "R$\u{a0}505,00");

        assert!(!ProjectForm {
            currency: Currency::EUR,
            ..form.clone()
        }
        .can_calculate(&provider));

        let status = form.select_currency(Currency::EUR, &provider).unwrap();
        assert_eq!(status, FormStatus::RatesLoading);
        assert!(form.results().is_loading());
        assert_eq!(form.results().project_price, LOADING_PLACEHOLDER);
        assert_eq!(form.results().net_profit, LOADING_PLACEHOLDER);
        assert_eq!(form.notice(), None);

        form.select_currency(Currency::BRL, &provider).unwrap();
        assert_eq!(form.results().currency, Some(Currency::BRL));
        form.select_currency(Currency::EUR, &provider).unwrap();

        provider.resolve(RateTable::fixed(5.0));
        assert!(form.can_calculate(&provider));
        assert_eq!(form.calculate(&provider).unwrap(), FormStatus::Calculated);
        assert_eq!(form.results().project_price, "101,00\u{a0}€");
        assert_eq!(form.results().currency, Some(Currency::EUR));
    }

    #[test]
    fn test_results_currency_matches_selection() {
        let fixed = FixedRateProvider::new();
        let loading = LiveRateProvider::new();
        let mut form = ProjectForm::default();
        form.set_hours("10");

        let steps: [(Currency, &dyn RateProvider); 5] = [
            (Currency::USD, &fixed),
            (Currency::EUR, &loading),
            (Currency::BRL, &loading),
            (Currency::USD, &loading),
            (Currency::EUR, &fixed),
        ];
        for (currency, provider) in steps {
            form.select_currency(currency, provider).unwrap();
            let shown = form.results().currency;
            assert!(shown.is_none() || shown == Some(form.currency()));
        }
    }
}
