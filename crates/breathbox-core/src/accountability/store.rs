//! JSON-file persistence for the accountability ledger.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{LedgerError, Result};
use crate::settings::data_dir;

use super::{DayPeriod, Ledger, Person};

/// Ledger handle bound to one JSON file. The in-memory copy is the source
/// of truth between saves; every mutation writes through.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: Ledger,
}

impl LedgerStore {
    /// Open the ledger at `path`. A missing or unreadable file starts
    /// all-false rather than failing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!("unreadable ledger at {}: {e}; starting fresh", path.display());
                    Ledger::default()
                }
            },
            Err(_) => Ledger::default(),
        };
        Self { path, ledger }
    }

    /// Open the ledger at its default location in the app data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("accountability.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current completion table.
    pub fn stats(&self) -> Ledger {
        self.ledger
    }

    /// Mark a completion and persist. Returns the updated table.
    pub fn record(&mut self, person: Person, period: DayPeriod) -> Result<Ledger> {
        self.ledger.record(person, period);
        self.save()?;
        Ok(self.ledger)
    }

    /// Reset both people to all-false and persist.
    pub fn reset_daily(&mut self) -> Result<()> {
        self.ledger.reset();
        self.save()
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.ledger)?;
        std::fs::write(&self.path, content).map_err(|e| LedgerError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_all_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::open(dir.path().join("ledger.json"));
        assert_eq!(store.stats(), Ledger::default());
    }

    #[test]
    fn record_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut store = LedgerStore::open(&path);
        store.record(Person::Andre, DayPeriod::Midday).unwrap();

        let reopened = LedgerStore::open(&path);
        assert!(reopened.stats().andre.midday);
        assert!(!reopened.stats().felipe.midday);
    }

    #[test]
    fn reset_daily_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut store = LedgerStore::open(&path);
        store.record(Person::Andre, DayPeriod::Morning).unwrap();
        store.record(Person::Felipe, DayPeriod::Evening).unwrap();
        store.reset_daily().unwrap();

        assert_eq!(store.stats(), Ledger::default());
        assert_eq!(LedgerStore::open(&path).stats(), Ledger::default());
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{{{").unwrap();
        assert_eq!(LedgerStore::open(&path).stats(), Ledger::default());
    }
}
