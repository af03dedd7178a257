use super::LedgerStore;
use crate::core::ledger::{COLUMNS, ExpenseRecord, Ledger};
use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ledger kept in a local CSV file with a fixed header row.
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for CsvLedgerStore {
    fn read(&self) -> Result<Ledger> {
        if !self.path.exists() {
            debug!("No ledger at {}, starting empty", self.path.display());
            return Ok(Ledger::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open ledger: {}", self.path.display()))?;
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = rdr.headers()?.clone();
        if !headers.iter().eq(COLUMNS.iter().copied()) {
            bail!(
                "Unexpected ledger header in {}: {:?}",
                self.path.display(),
                headers
            );
        }

        let mut records = Vec::new();
        for (i, row) in rdr.deserialize::<ExpenseRecord>().enumerate() {
            let record = row.with_context(|| {
                format!("Invalid ledger row {} in {}", i + 1, self.path.display())
            })?;
            records.push(record);
        }
        debug!(
            count = records.len(),
            "Loaded ledger from {}",
            self.path.display()
        );
        Ok(Ledger::from(records))
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        // Header is written by hand so an empty ledger still carries the schema
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .with_context(|| format!("Failed to write ledger: {}", self.path.display()))?;
        wtr.write_record(COLUMNS)?;
        for record in ledger.records() {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        debug!(
            count = ledger.len(),
            "Saved ledger to {}",
            self.path.display()
        );
        Ok(())
    }
}
