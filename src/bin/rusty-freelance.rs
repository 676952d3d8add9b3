//! rusty-freelance CLI - terminal front-end for the project estimator
//!
//! ## Example Usage
//!
//! ```bash
//! # Quote 10 hours at R$ 50,50/h with R$ 15,50/h cost, in dollars
//! rusty-freelance quote --price 50,50 --cost 15,50 --hours 10 --currency USD
//!
//! # Same, with live exchange rates
//! rusty-freelance quote --price 50,50 --cost 15,50 --hours 10 --currency EUR --live
//!
//! # Show the rates in use
//! rusty-freelance rates --live
//!
//! # Show configuration
//! rusty-freelance info
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rusty_freelance::calculator::ProjectCalculator;
use rusty_freelance::config::{Config, RateMode};
use rusty_freelance::currency::Currency;
use rusty_freelance::error::{FreelanceError, Result as FreelanceResult};
use rusty_freelance::form::{FormStatus, HoursMode, ProjectForm};
use rusty_freelance::format::format_rate;
use rusty_freelance::rates::{HttpRateSource, LiveRateProvider, RateProvider, RateStatus};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

/// rusty-freelance: freelance project price, cost and profit estimator
#[derive(Parser)]
#[command(name = "rusty-freelance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Freelance project price, cost and profit estimator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a project
    Quote {
        /// Price per hour in BRL, decimal comma (e.g. 50,50)
        #[arg(short = 'p', long, default_value = "50,50")]
        price: String,

        /// Cost per hour in BRL, decimal comma (e.g. 15,50)
        #[arg(short = 'k', long, default_value = "15,50")]
        cost: String,

        /// Number of hours
        #[arg(short = 'H', long)]
        hours: Option<String>,

        /// Output currency (BRL, USD, EUR); defaults to the configured one
        #[arg(short = 'C', long)]
        currency: Option<String>,

        /// Use live exchange rates instead of the fixed rate
        #[arg(short = 'l', long)]
        live: bool,

        /// Treat hours as a slider value (whole hours, 1 to 160)
        #[arg(long)]
        slider: bool,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the exchange rates in use
    Rates {
        /// Fetch live rates instead of showing the fixed rate
        #[arg(short = 'l', long)]
        live: bool,
    },

    /// Show configuration
    Info,
}

struct QuoteConfig {
    price: String,
    cost: String,
    hours: Option<String>,
    currency: Option<String>,
    live: bool,
    slider: bool,
    json: bool,
    verbose: bool,
    config: Config,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rusty-freelance").join("config.toml"))
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = Config::load(config_path.as_deref());

    if cli.verbose {
        println!(
            "{} v{}",
            "rusty-freelance".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let result = match cli.command {
        Commands::Quote {
            price,
            cost,
            hours,
            currency,
            live,
            slider,
            json,
        } => {
            run_quote(QuoteConfig {
                price,
                cost,
                hours,
                currency,
                live,
                slider,
                json,
                verbose: cli.verbose,
                config,
            })
            .await
        }

        Commands::Rates { live } => show_rates(live, &config).await,

        Commands::Info => show_info(&config, config_path.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run_quote(cfg: QuoteConfig) -> FreelanceResult<()> {
    let currency = match cfg.currency.as_deref() {
        Some(code) => code.parse::<Currency>()?,
        None => cfg.config.default_currency,
    };

    let use_live = cfg.live || cfg.config.rate_mode == RateMode::Live;
    let provider = build_provider(use_live, &cfg.config).await?;

    let mode = if cfg.slider {
        HoursMode::Slider
    } else {
        cfg.config.hours_mode
    };
    let mut form = ProjectForm::new(mode);
    form.price_per_hour = cfg.price;
    form.cost_per_hour = cfg.cost;
    if let Some(hours) = cfg.hours.as_deref() {
        if !form.set_hours(hours) {
            eprintln!(
                "{} hours {:?} outside 1..=160, keeping {}",
                "Warning:".yellow(),
                hours,
                form.hours().hours()
            );
        }
    }

    if cfg.verbose {
        println!("Input: {:?}", form.snapshot());
    }

    match form.select_currency(currency, provider.as_ref())? {
        FormStatus::RatesLoading => return Err(FreelanceError::RateUnavailable(currency)),
        FormStatus::Calculated | FormStatus::Idle => {}
    }

    if cfg.json {
        let quote = ProjectCalculator::new(provider.as_ref()).compute(&form.snapshot())?;
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let results = form.results();
    println!("{}", "Project estimate".bold());
    println!("  {:<14} {}", "Project price:", results.project_price.green());
    println!("  {:<14} {}", "Project cost:", results.project_cost.red());
    println!("  {:<14} {}", "Net profit:", results.net_profit.purple().bold());
    if let Some(notice) = form.notice() {
        println!("  {}", notice.dimmed());
    }

    Ok(())
}

async fn build_provider(live: bool, config: &Config) -> FreelanceResult<Box<dyn RateProvider>> {
    if !live {
        return Ok(Box::new(config.fixed_provider()?));
    }

    let provider = fetch_live(config).await?;
    Ok(Box::new(provider))
}

async fn fetch_live(config: &Config) -> FreelanceResult<Arc<LiveRateProvider>> {
    let source = HttpRateSource::with_endpoint(config.rates_endpoint.clone())?;
    let provider = LiveRateProvider::spawn(source, config.fetch_timeout());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Loading exchange rates...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let status = provider.wait_resolved().await;
    spinner.finish_and_clear();

    if status == RateStatus::Failed {
        eprintln!(
            "{} live rates unavailable: {}",
            "Warning:".yellow(),
            provider.failure().unwrap_or("unknown error")
        );
    }

    Ok(provider)
}

async fn show_rates(live: bool, config: &Config) -> FreelanceResult<()> {
    if live || config.rate_mode == RateMode::Live {
        let provider = fetch_live(config).await?;
        println!("{} (live)", "Exchange rates".bold());
        print_rates(provider.as_ref());
        if let Some(captured_at) = provider.captured_at() {
            println!(
                "  {}",
                format!("Captured at {}", captured_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
            );
        }
    } else {
        let provider = config.fixed_provider()?;
        println!("{} (fixed)", "Exchange rates".bold());
        print_rates(&provider);
    }

    Ok(())
}

fn print_rates<P: RateProvider + ?Sized>(provider: &P) {
    for currency in Currency::all() {
        match provider.rate(currency) {
            Ok(rate) => println!(
                "  1 BRL = {} {}",
                format_rate(rate),
                currency.code().cyan()
            ),
            Err(_) => println!("  {} {}", currency.code().cyan(), "unavailable".yellow()),
        }
    }
}

fn show_info(config: &Config, path: Option<&Path>) -> FreelanceResult<()> {
    println!("{}", "rusty-freelance".cyan().bold());
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    match path {
        Some(path) => println!("  Config file: {}", path.display().to_string().dimmed()),
        None => println!("  Config file: {}", "(none)".dimmed()),
    }
    println!();
    print!("{}", config.to_toml_string()?);
    Ok(())
}
