use super::LedgerStore;
use crate::core::ledger::Ledger;
use anyhow::{Result, anyhow};
use std::sync::Mutex;
use tracing::debug;

/// In-memory ledger store, lost when the process exits
#[derive(Default)]
pub struct MemoryLedgerStore {
    inner: Mutex<Ledger>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Mutex::new(ledger),
        }
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn read(&self) -> Result<Ledger> {
        let ledger = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        Ok(ledger.clone())
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let mut stored = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        *stored = ledger.clone();
        debug!(count = ledger.len(), "Memory store SAVE");
        Ok(())
    }
}
