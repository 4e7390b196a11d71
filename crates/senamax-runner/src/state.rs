//! Engine state persistence for the runner.
//!
//! The engine treats config and prediction persistence as store writes; when
//! running against the in-memory store, this module gives those writes a
//! life beyond the process: a small JSON state file reloaded on startup and
//! rewritten after every mutating command.

use anyhow::{Context, Result};
use senamax_models::{PredictionRecord, WeightConfig};
use senamax_store::{HistoryStore, MemoryStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Persisted engine state: the current weight configuration plus any
/// outstanding prediction records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineState {
    pub config: Option<WeightConfig>,
    #[serde(default)]
    pub predictions: Vec<PredictionRecord>,
}

impl EngineState {
    /// Load state from a JSON file; a missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read state file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("malformed state file {}", path.display()))
    }

    /// Write state back to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("could not write state file {}", path.display()))?;
        info!(path = %path.display(), "engine state saved");
        Ok(())
    }

    /// Apply this state to a freshly built store.
    pub fn apply(&self, store: &mut MemoryStore) -> Result<(), StoreError> {
        if let Some(config) = self.config {
            store.weight_config_write(&config)?;
        }
        for record in &self.predictions {
            store.prediction_write(record)?;
        }
        Ok(())
    }

    /// Capture the persistable parts of a store after a command ran.
    pub fn capture(store: &MemoryStore) -> Result<Self, StoreError> {
        Ok(Self {
            config: store.weight_config_read()?,
            predictions: store.predictions(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = EngineState::load(&dir.path().join("state.json")).unwrap();
        assert!(state.config.is_none());
        assert!(state.predictions.is_empty());
    }

    #[test]
    fn test_roundtrip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let record = PredictionRecord::new(42, [1, 2, 3, 4, 5, 6], WeightConfig::default());
        let state = EngineState {
            config: Some(WeightConfig::default()),
            predictions: vec![record.clone()],
        };
        state.save(&path).unwrap();

        let loaded = EngineState::load(&path).unwrap();
        let mut store = MemoryStore::new();
        loaded.apply(&mut store).unwrap();
        assert_eq!(store.weight_config_read().unwrap(), Some(WeightConfig::default()));
        assert_eq!(store.prediction_read(42).unwrap(), Some(record));
    }

    #[test]
    fn test_capture_collects_config_and_predictions() {
        let mut store = MemoryStore::new();
        let record = PredictionRecord::new(7, [1, 2, 3, 4, 5, 6], WeightConfig::default());
        store.prediction_write(&record).unwrap();
        store.weight_config_write(&WeightConfig::default()).unwrap();

        let state = EngineState::capture(&store).unwrap();
        assert_eq!(state.predictions.len(), 1);
        assert!(state.config.is_some());
    }
}
