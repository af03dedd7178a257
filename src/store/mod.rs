pub mod disk;
pub mod memory;

use crate::core::ledger::Ledger;
use anyhow::Result;
use tracing::warn;

pub use disk::CsvLedgerStore;
pub use memory::MemoryLedgerStore;

/// Flat storage holding the whole ledger. Every save overwrites what was
/// stored before.
pub trait LedgerStore: Send + Sync {
    /// Reads the stored ledger. A store that has never been written returns
    /// an empty ledger; unreadable data is an error.
    fn read(&self) -> Result<Ledger>;

    /// Replaces the stored ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Like [`LedgerStore::read`], but unreadable data yields an empty ledger.
    fn load(&self) -> Ledger {
        match self.read() {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(error = %e, "Failed to read ledger, starting empty");
                Ledger::new()
            }
        }
    }
}
