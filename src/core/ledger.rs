//! Expense ledger model: records, validation, trip views and totals.
use crate::core::currency::Currency;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column order of the persisted ledger.
pub const COLUMNS: [&str; 7] = [
    "trip_name",
    "date",
    "category",
    "item",
    "currency",
    "original_amount",
    "home_total",
];

/// A single converted expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub trip_name: String,
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub home_total: Decimal,
}

/// Expense details as entered, before conversion to the home currency.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub trip_name: String,
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub currency: Currency,
    pub amount: Decimal,
}

/// Reasons an expense is refused before it reaches the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item must not be empty")]
    EmptyItem,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("trip name must not be empty")]
    EmptyTripName,
    #[error("amount is too large to record")]
    AmountTooLarge,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.item.trim().is_empty() {
            return Err(ValidationError::EmptyItem);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.trip_name.trim().is_empty() {
            return Err(ValidationError::EmptyTripName);
        }
        Ok(())
    }

    /// Validates the input and converts it with `rate` into a record.
    pub fn into_record(self, rate: Decimal) -> Result<ExpenseRecord, ValidationError> {
        self.validate()?;
        let home_total = self
            .currency
            .to_home(self.amount, rate)
            .ok_or(ValidationError::AmountTooLarge)?;
        Ok(ExpenseRecord {
            trip_name: self.trip_name,
            date: self.date,
            category: self.category,
            item: self.item,
            currency: self.currency,
            original_amount: self.amount,
            home_total,
        })
    }
}

/// All expense records across every trip, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct trip names in the order they first appear.
    pub fn distinct_trips(&self) -> Vec<String> {
        let mut trips: Vec<String> = Vec::new();
        for record in &self.records {
            if !trips.contains(&record.trip_name) {
                trips.push(record.trip_name.clone());
            }
        }
        trips
    }

    pub fn filter_by_trip(&self, trip_name: &str) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|r| r.trip_name == trip_name)
            .collect()
    }

    /// Returns a copy of this ledger with `expense` converted and appended.
    /// `self` is never modified, so a rejected or unsaved append leaves it intact.
    /// An expense that would push its trip's total past `Decimal::MAX` is refused.
    pub fn append(&self, expense: NewExpense, rate: Decimal) -> Result<Ledger, ValidationError> {
        let record = expense.into_record(rate)?;
        self.filter_by_trip(&record.trip_name)
            .iter()
            .try_fold(record.home_total, |acc, r| acc.checked_add(r.home_total))
            .ok_or(ValidationError::AmountTooLarge)?;
        let mut records = self.records.clone();
        records.push(record);
        Ok(Ledger { records })
    }
}

impl From<Vec<ExpenseRecord>> for Ledger {
    fn from(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }
}

/// Sum of `home_total` over `records`, saturating at `Decimal::MAX`.
pub fn total_home_currency<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.home_total))
}
