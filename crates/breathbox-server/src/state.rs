use std::path::PathBuf;
use std::sync::Arc;

use breathbox_core::LedgerStore;
use tokio::sync::Mutex;

/// Shared handler state. The ledger sits behind an async mutex so
/// concurrent completions serialize their read-modify-write.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<LedgerStore>>,
}

impl AppState {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(LedgerStore::open(path))
    }
}
