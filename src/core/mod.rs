//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod ledger;
pub mod log;
pub mod state;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyRateProvider};
pub use ledger::{ExpenseRecord, Ledger, NewExpense, ValidationError, total_home_currency};
pub use state::{AppState, AppendOutcome, TripSummary};
