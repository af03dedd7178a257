//! Currency conversion abstractions

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Currencies an expense can be recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Jpy,
    Twd,
}

impl Currency {
    /// The foreign currency that gets converted.
    pub const SOURCE: Currency = Currency::Jpy;
    /// The currency totals are reported in.
    pub const HOME: Currency = Currency::Twd;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Jpy => "JPY",
            Currency::Twd => "TWD",
        }
    }

    /// Converts `amount` in this currency into the home currency.
    /// `None` when the product does not fit in a `Decimal`.
    pub fn to_home(&self, amount: Decimal, rate: Decimal) -> Option<Decimal> {
        if *self == Currency::SOURCE {
            amount.checked_mul(rate)
        } else {
            Some(amount)
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "JPY" => Ok(Currency::Jpy),
            "TWD" => Ok(Currency::Twd),
            _ => Err(anyhow!("Unsupported currency: {}", s)),
        }
    }
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: Currency, to: Currency) -> Result<Decimal>;
}
