use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::StoreError;

/// Durable key-to-string store supplied by the host.
///
/// Absence and read failures are indistinguishable to the core: both mean
/// "no persisted state". Save failures are reported so the caller can log
/// them, but never abort a catalog operation.
pub trait PersistenceAdapter: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory adapter, used by tests and as a no-persistence fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry, bypassing the adapter interface.
    pub fn insert(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Invalid("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
