use std::path::PathBuf;

use tracing::warn;

use boletera_catalog::{PersistenceAdapter, StoreError};

use super::atomic::write_bytes_atomic;

/// Durable key-value store backed by one file per key.
///
/// Reads treat any failure as absence; writes go through the atomic
/// temp-then-rename path so a crash never leaves a torn state file.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl PersistenceAdapter for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(event = "state_read_failed", key = %key, error = %err);
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        write_bytes_atomic(&self.key_path(key), value.as_bytes()).map_err(|err| match err {
            super::StorageError::Io(err) => StoreError::Io(err),
            other => StoreError::Invalid(other.to_string()),
        })
    }
}
