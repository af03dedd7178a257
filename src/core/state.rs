//! Session state shared by every command handler.
use crate::core::ledger::{ExpenseRecord, Ledger, NewExpense, ValidationError, total_home_currency};
use crate::providers::RateService;
use crate::store::LedgerStore;
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Result of trying to add an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The record was converted, appended and persisted.
    Appended { record: ExpenseRecord, rate: Decimal },
    /// The input was refused and nothing changed.
    Rejected(ValidationError),
}

/// Records of one trip with their home-currency total.
#[derive(Debug, Clone)]
pub struct TripSummary {
    pub trip_name: String,
    pub records: Vec<ExpenseRecord>,
    pub total: Decimal,
}

pub struct AppState {
    store: Box<dyn LedgerStore>,
    rates: RateService,
    ledger: Ledger,
    selected_trip: Option<String>,
}

impl AppState {
    /// Builds the state and loads the ledger from `store`.
    pub fn new(store: Box<dyn LedgerStore>, rates: RateService) -> Self {
        let ledger = store.load();
        debug!(records = ledger.len(), "Ledger loaded");
        Self {
            store,
            rates,
            ledger,
            selected_trip: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn trips(&self) -> Vec<String> {
        self.ledger.distinct_trips()
    }

    /// Selects an existing trip or names a new one. A new trip only exists
    /// in the ledger once an expense is added to it.
    pub fn select_trip(&mut self, trip_name: &str) -> Result<()> {
        let trip_name = trip_name.trim();
        if trip_name.is_empty() {
            return Err(anyhow!(ValidationError::EmptyTripName));
        }
        self.selected_trip = Some(trip_name.to_string());
        Ok(())
    }

    pub fn selected_trip(&self) -> Option<&str> {
        self.selected_trip.as_deref()
    }

    pub async fn current_rate(&self) -> Decimal {
        self.rates.get_rate().await
    }

    /// Converts `expense` at the current rate, appends it and persists the
    /// whole ledger. The in-memory ledger is only replaced once the save
    /// succeeded.
    pub async fn add_expense(&mut self, expense: NewExpense) -> Result<AppendOutcome> {
        if let Err(e) = expense.validate() {
            debug!(error = %e, "Expense rejected");
            return Ok(AppendOutcome::Rejected(e));
        }

        let rate = self.current_rate().await;
        let updated = match self.ledger.append(expense, rate) {
            Ok(ledger) => ledger,
            Err(e) => return Ok(AppendOutcome::Rejected(e)),
        };
        self.store.save(&updated)?;
        self.ledger = updated;

        let record = self
            .ledger
            .records()
            .last()
            .cloned()
            .ok_or_else(|| anyhow!("Ledger empty after append"))?;
        info!(trip = %record.trip_name, item = %record.item, %rate, "Expense added");
        Ok(AppendOutcome::Appended { record, rate })
    }

    pub fn trip_summary(&self, trip_name: &str) -> TripSummary {
        let records = self.ledger.filter_by_trip(trip_name);
        let total = total_home_currency(records.iter().copied());
        TripSummary {
            trip_name: trip_name.to_string(),
            records: records.into_iter().cloned().collect(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::{Currency, CurrencyRateProvider};
    use crate::providers::caching::DEFAULT_TTL;
    use crate::store::MemoryLedgerStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct FixedRate(Option<Decimal>);

    #[async_trait]
    impl CurrencyRateProvider for FixedRate {
        async fn get_rate(&self, _from: Currency, _to: Currency) -> Result<Decimal> {
            self.0.ok_or_else(|| anyhow!("offline"))
        }
    }

    struct FailingStore;

    impl LedgerStore for FailingStore {
        fn read(&self) -> Result<Ledger> {
            Ok(Ledger::new())
        }

        fn save(&self, _ledger: &Ledger) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    struct SharedStore(Arc<MemoryLedgerStore>);

    impl LedgerStore for SharedStore {
        fn read(&self) -> Result<Ledger> {
            self.0.read()
        }

        fn save(&self, ledger: &Ledger) -> Result<()> {
            self.0.save(ledger)
        }
    }

    fn rates(rate: Option<Decimal>) -> RateService {
        RateService::new(Box::new(FixedRate(rate)), DEFAULT_TTL, Decimal::new(21, 2))
    }

    fn expense(trip: &str, item: &str, currency: Currency, amount: i64) -> NewExpense {
        NewExpense {
            trip_name: trip.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            category: "food".to_string(),
            item: item.to_string(),
            currency,
            amount: Decimal::new(amount, 0),
        }
    }

    #[tokio::test]
    async fn test_add_expense_persists_and_converts() {
        let backing = Arc::new(MemoryLedgerStore::new());
        let mut state = AppState::new(
            Box::new(SharedStore(Arc::clone(&backing))),
            rates(Some(Decimal::new(2, 1))),
        );

        let outcome = state
            .add_expense(expense("Tokyo", "sushi", Currency::Jpy, 5000))
            .await
            .unwrap();
        match outcome {
            AppendOutcome::Appended { record, rate } => {
                assert_eq!(rate, Decimal::new(2, 1));
                assert_eq!(record.home_total, Decimal::new(1000, 0));
            }
            AppendOutcome::Rejected(e) => panic!("unexpected rejection: {e}"),
        }
        assert_eq!(state.ledger().len(), 1);
        assert_eq!(backing.load(), *state.ledger());
    }

    #[tokio::test]
    async fn test_rejected_expense_leaves_ledger_unchanged() {
        let backing = Arc::new(MemoryLedgerStore::new());
        let mut state = AppState::new(
            Box::new(SharedStore(Arc::clone(&backing))),
            rates(Some(Decimal::ONE)),
        );

        let outcome = state
            .add_expense(expense("Tokyo", "", Currency::Jpy, 100))
            .await
            .unwrap();
        assert_eq!(outcome, AppendOutcome::Rejected(ValidationError::EmptyItem));

        let outcome = state
            .add_expense(expense("", "tea", Currency::Twd, 100))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            AppendOutcome::Rejected(ValidationError::EmptyTripName)
        );
        assert!(state.ledger().is_empty());
        assert!(backing.load().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_ledger() {
        let mut state = AppState::new(Box::new(FailingStore), rates(Some(Decimal::ONE)));

        let result = state
            .add_expense(expense("Tokyo", "sushi", Currency::Jpy, 100))
            .await;
        assert_eq!(result.unwrap_err().to_string(), "disk full");
        assert!(state.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_offline_uses_fallback_rate() {
        let mut state = AppState::new(Box::new(MemoryLedgerStore::new()), rates(None));
        assert_eq!(state.current_rate().await, Decimal::new(21, 2));

        let outcome = state
            .add_expense(expense("Sapporo", "soup curry", Currency::Jpy, 1000))
            .await
            .unwrap();
        let AppendOutcome::Appended { record, .. } = outcome else {
            panic!("expected append");
        };
        assert_eq!(record.home_total, Decimal::new(210, 0));
    }

    #[tokio::test]
    async fn test_trips_and_summary() {
        let mut state = AppState::new(Box::new(MemoryLedgerStore::new()), rates(Some(Decimal::ONE)));
        for (trip, amount) in [("A", 100), ("B", 40), ("A", 250)] {
            state
                .add_expense(expense(trip, "item", Currency::Twd, amount))
                .await
                .unwrap();
        }

        assert_eq!(state.trips(), vec!["A", "B"]);
        let summary = state.trip_summary("A");
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.records[0].original_amount, Decimal::new(100, 0));
        assert_eq!(summary.records[1].original_amount, Decimal::new(250, 0));
        assert_eq!(summary.total, Decimal::new(350, 0));
        assert_eq!(state.trip_summary("Z").total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_oversized_amounts_do_not_break_summary() {
        let mut state = AppState::new(Box::new(MemoryLedgerStore::new()), rates(Some(Decimal::ONE)));

        let mut max = expense("Monaco", "yacht", Currency::Twd, 0);
        max.amount = Decimal::MAX;
        let first = state.add_expense(max.clone()).await.unwrap();
        assert!(matches!(first, AppendOutcome::Appended { .. }));
        let second = state.add_expense(max).await.unwrap();
        assert_eq!(
            second,
            AppendOutcome::Rejected(ValidationError::AmountTooLarge)
        );
        assert_eq!(state.ledger().len(), 1);
        assert_eq!(state.trip_summary("Monaco").total, Decimal::MAX);

        // Records written before the limit existed still summarize
        let record = state.ledger().records()[0].clone();
        let stored = Ledger::from(vec![record.clone(), record]);
        let state = AppState::new(
            Box::new(MemoryLedgerStore::with_ledger(stored)),
            rates(Some(Decimal::ONE)),
        );
        let summary = state.trip_summary("Monaco");
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.total, Decimal::MAX);
    }

    #[test]
    fn test_select_trip() {
        let mut state = AppState::new(Box::new(MemoryLedgerStore::new()), rates(None));
        assert!(state.selected_trip().is_none());

        state.select_trip("  Okinawa ").unwrap();
        assert_eq!(state.selected_trip(), Some("Okinawa"));
        assert!(state.select_trip("   ").is_err());
        assert_eq!(state.selected_trip(), Some("Okinawa"));
    }
}
