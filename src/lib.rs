pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::RateProvider;
use crate::providers::ExchangeRateApiSource;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Rate {
        from: String,
        to: String,
    },
    Rates {
        base: Option<String>,
    },
}

/// Builds the rate provider described by `config`.
///
/// `offline`, or a config without a live provider, pins the fallback table.
pub fn build_provider(config: &config::AppConfig, offline: bool) -> Result<RateProvider> {
    let api = match config.exchange_rate_api() {
        Some(api) if !offline => api,
        _ => {
            debug!("Live rates disabled, using fallback table only");
            return Ok(RateProvider::offline());
        }
    };

    let source = ExchangeRateApiSource::new(&api.base_url)
        .context("Failed to create exchange rate client")?;
    Ok(RateProvider::new(Arc::new(source), api.timeout()))
}

/// Starts acquisition and waits for it to settle, so one-shot commands get
/// live rates whenever they arrive within the timeout.
async fn acquire_rates(provider: &RateProvider) {
    provider.acquire();
    if provider.is_loading() {
        let spinner = cli::ui::new_spinner("Fetching exchange rates...");
        provider.settled().await;
        spinner.finish_and_clear();
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    offline: bool,
) -> Result<()> {
    info!("Sparkl rates starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = build_provider(&config, offline)?;
    acquire_rates(&provider).await;

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&provider, amount, &from, &to).await
        }
        AppCommand::Rate { from, to } => cli::convert::run_rate(&provider, &from, &to).await,
        AppCommand::Rates { base } => {
            let base = base.unwrap_or_else(|| config.base_currency.clone());
            cli::rates::run(&provider, &base).await
        }
    }
}
