use crate::core::currency::{Currency, CurrencyRateProvider};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Latest-rate lookups against the open.er-api.com endpoint
pub struct ErApiProvider {
    base_url: String,
    timeout: Duration,
}

impl ErApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        ErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    rates: HashMap<String, Decimal>,
}

#[async_trait]
impl CurrencyRateProvider for ErApiProvider {
    #[instrument(name = "ErApiRateFetch", skip(self))]
    async fn get_rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
        let url = format!("{}/v6/latest/{}", self.base_url, from.code());
        debug!("Requesting currency rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("tripledger/0.1")
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}{}", e, from, to))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}{}",
                response.status(),
                from,
                to
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}{}: {}", from, to, e))?;

        if let Some(result) = data.result.as_deref() {
            if result != "success" {
                return Err(anyhow!("Rate service returned result: {}", result));
            }
        }

        let rate = data
            .rates
            .get(to.code())
            .copied()
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}{}", from, to))?;

        if rate <= Decimal::ZERO {
            return Err(anyhow!("Invalid rate {} for currency pair: {}{}", rate, from, to));
        }

        Ok(rate)
    }
}
