pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::add::AddExpense;
use crate::core::AppState;
use crate::core::config::AppConfig;
use crate::providers::{ErApiProvider, RateService};
use crate::store::CsvLedgerStore;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Trips,
    Add(AddExpense),
    Show { trip: Option<String> },
    Rate,
}

/// Builds the session state from `config`: the CSV ledger and a cached rate service.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let store = CsvLedgerStore::new(config.ledger_path()?);
    debug!("Using ledger at {}", store.path().display());

    let provider_config = &config.providers.exchange_rate;
    let provider = ErApiProvider::new(
        &provider_config.base_url,
        Duration::from_secs(provider_config.timeout_secs),
    );
    let rates = RateService::new(
        Box::new(provider),
        Duration::from_secs(config.rate.ttl_secs),
        config.rate.fallback,
    );

    Ok(AppState::new(Box::new(store), rates))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Trip ledger starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut state = build_state(&config)?;

    match command {
        AppCommand::Trips => cli::trips::run(&state),
        AppCommand::Add(args) => cli::add::run(&mut state, &config, args).await,
        AppCommand::Show { trip } => cli::show::run(&mut state, trip.as_deref()),
        AppCommand::Rate => cli::rate::run(&state).await,
    }
}
