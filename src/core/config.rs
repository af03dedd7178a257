use anyhow::{Context, Result};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_RATE_BASE_URL: &str = "https://open.er-api.com";

fn default_categories() -> Vec<String> {
    ["food", "transport", "lodging", "skiing", "shopping", "other"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_base_url() -> String {
    DEFAULT_RATE_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_fallback() -> Decimal {
    Decimal::new(21, 2)
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        ExchangeRateProviderConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub exchange_rate: ExchangeRateProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateConfig {
    /// Seconds a fetched rate stays fresh
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Rate used whenever the provider cannot be reached
    #[serde(default = "default_fallback")]
    pub fallback: Decimal,
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            ttl_secs: default_ttl_secs(),
            fallback: default_fallback(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub ledger_path: Option<String>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub rate: RateConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            ledger_path: None,
            categories: default_categories(),
            providers: ProvidersConfig::default(),
            rate: RateConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "tripledger", "tripledger")
            .context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn ledger_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.ledger_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(Self::project_dirs()?.data_dir().join("ledger.csv"))
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
