//! Reinforcement-style recalibration trigger.
//!
//! The system's only feedback loop, and deliberately a threshold rule: a
//! poor prediction forces a wider grid search; a good one is reinforced by
//! leaving the configuration untouched.

use crate::calibrate::calibrate;
use crate::EngineConfig;
use senamax_models::WeightConfig;
use senamax_store::{HistoryStore, StoreError};
use serde::Serialize;
use tracing::info;

/// Hits below this threshold force recalibration.
const RECALIBRATION_THRESHOLD: usize = 4;

/// Outcome of auditing the latest draw against its stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReinforceOutcome {
    /// Draw id that was audited.
    pub target_draw_id: u32,
    /// Intersection between prediction and real numbers.
    pub hits: usize,
    /// Whether a widened recalibration ran.
    pub recalibrated: bool,
    /// Configuration in force afterwards.
    pub config: WeightConfig,
}

/// Audit the latest real draw against the prediction that targeted it.
///
/// Returns `None` when there is no history yet or no prediction was stored
/// for the latest draw. Below [`RECALIBRATION_THRESHOLD`] hits the grid
/// search reruns over the widened `recalibration_window`; otherwise the
/// current configuration is kept as-is.
pub fn reinforce<S: HistoryStore>(
    store: &mut S,
    cfg: &EngineConfig,
) -> Result<Option<ReinforceOutcome>, StoreError> {
    let latest = match store.recent_draws(1)?.pop() {
        Some(draw) => draw,
        None => return Ok(None),
    };

    let prediction = match store.prediction_read(latest.id)? {
        Some(record) => record,
        None => {
            info!(draw_id = latest.id, "no stored prediction to audit");
            return Ok(None);
        }
    };

    let hits = latest.hits(&prediction.numbers);

    if hits < RECALIBRATION_THRESHOLD {
        info!(
            draw_id = latest.id,
            hits, "prediction missed; forcing widened recalibration"
        );
        let config = calibrate(store, cfg, cfg.recalibration_window)?;
        Ok(Some(ReinforceOutcome {
            target_draw_id: latest.id,
            hits,
            recalibrated: true,
            config,
        }))
    } else {
        info!(draw_id = latest.id, hits, "prediction held; reinforcing current weights");
        let config = store.weight_config_read()?.unwrap_or_default();
        Ok(Some(ReinforceOutcome {
            target_draw_id: latest.id,
            hits,
            recalibrated: false,
            config,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use senamax_models::{Draw, PredictionRecord};
    use senamax_store::MemoryStore;

    fn draw(id: u32, numbers: [u8; 6]) -> Draw {
        Draw::new(id, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), numbers).unwrap()
    }

    fn store_with_prediction(predicted: [u8; 6]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for id in 1..=25u32 {
            store.insert_draw(draw(id, [1, 2, 3, 4, 5, 6]).with_popularity(1.5));
        }
        store
            .prediction_write(&PredictionRecord::new(25, predicted, WeightConfig::default()))
            .unwrap();
        store
    }

    #[test]
    fn test_three_hits_triggers_recalibration() {
        // Prediction shares exactly 3 numbers with the real draw.
        let mut store = store_with_prediction([1, 2, 3, 40, 50, 60]);
        let cfg = EngineConfig::default();
        let outcome = reinforce(&mut store, &cfg).unwrap().unwrap();
        assert_eq!(outcome.hits, 3);
        assert!(outcome.recalibrated);
        // Recalibration persisted a fresh grid configuration.
        assert_eq!(store.weight_config_read().unwrap(), Some(outcome.config));
    }

    #[test]
    fn test_four_hits_reinforces_by_inaction() {
        let mut store = store_with_prediction([1, 2, 3, 4, 50, 60]);
        let persisted = WeightConfig {
            popularity: 2.0,
            neighborhood: 2.0,
            silence: 1.0,
            momentum: 3.0,
        };
        store.weight_config_write(&persisted).unwrap();

        let cfg = EngineConfig::default();
        let outcome = reinforce(&mut store, &cfg).unwrap().unwrap();
        assert_eq!(outcome.hits, 4);
        assert!(!outcome.recalibrated);
        // Configuration untouched.
        assert_eq!(outcome.config, persisted);
        assert_eq!(store.weight_config_read().unwrap(), Some(persisted));
    }

    #[test]
    fn test_no_prediction_is_a_noop() {
        let mut store = MemoryStore::new();
        store.insert_draw(draw(1, [1, 2, 3, 4, 5, 6]));
        let cfg = EngineConfig::default();
        assert!(reinforce(&mut store, &cfg).unwrap().is_none());
    }

    #[test]
    fn test_empty_history_is_a_noop() {
        let mut store = MemoryStore::new();
        let cfg = EngineConfig::default();
        assert!(reinforce(&mut store, &cfg).unwrap().is_none());
    }
}
