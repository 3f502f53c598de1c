use std::sync::Arc;

use tracing::{info, warn};

use boletera_core::{SERIES_KEY, Series};

use crate::store::PersistenceAdapter;

/// Named generation templates, keyed by series name.
///
/// Templates have no ownership relation to tickets: removing or re-saving a
/// series never touches tickets generated from it.
pub struct SeriesRegistry {
    series: Vec<Series>,
    store: Arc<dyn PersistenceAdapter>,
}

impl SeriesRegistry {
    pub fn load(store: Arc<dyn PersistenceAdapter>) -> Self {
        let series = match store.load(SERIES_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<Series>>(&raw) {
                Ok(series) => series,
                Err(err) => {
                    warn!(event = "series_state_invalid", error = %err, "starting with an empty registry");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self { series, store }
    }

    /// Save a template. A no-op when the name is already present, even if
    /// called with a different prefix; empty names are rejected.
    pub fn save(&mut self, name: &str, prefix: &str) -> bool {
        if name.is_empty() || self.series.iter().any(|series| series.name == name) {
            return false;
        }
        self.series.insert(
            0,
            Series {
                name: name.to_string(),
                prefix: prefix.to_string(),
            },
        );
        self.persist();
        info!(event = "series_saved", name = %name);
        true
    }

    /// Pure lookup used to pre-fill generation parameters.
    pub fn lookup(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|series| series.name == name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.series.iter().position(|series| series.name == name) else {
            return false;
        };
        self.series.remove(index);
        self.persist();
        info!(event = "series_removed", name = %name);
        true
    }

    /// Templates in insertion order, most recently saved first.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.series) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(event = "series_encode_failed", error = %err, "registry state not persisted");
                return;
            }
        };
        if let Err(err) = self.store.save(SERIES_KEY, &raw) {
            warn!(event = "series_save_failed", error = %err, "registry state not persisted");
        }
    }
}
