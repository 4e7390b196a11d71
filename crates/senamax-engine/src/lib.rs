//! Senamax Engine
//!
//! Adaptive weighted-scoring and backtest calibration over historical draws.
//!
//! ## Pipeline
//! Signal providers turn store aggregates into candidate layers; the
//! aggregator sums layer weights per number and applies regime, consensus and
//! cycle-urgency adjustments; the candidate filter enumerates 6-number
//! combinations of the top-scored pool under structural constraints; the
//! grid-search calibrator backtests weight tuples against recent real draws
//! and persists the winner; the reinforcement trigger widens the backtest
//! window after a poor prediction.
//!
//! ## Determinism Contract
//! - Same store contents + same [`EngineConfig`] + same RNG seed → same
//!   outputs, byte for byte.
//! - Every ranked cut breaks score ties by ascending numeric value.
//! - The only randomness (the random base strategy and the blended meta
//!   selection) comes from a caller-injected seeded RNG.

pub mod affinity;
pub mod anchors;
pub mod backtest;
pub mod calibrate;
pub mod cycle;
pub mod filter;
pub mod fusion;
pub mod regime;
pub mod reinforce;
pub mod score;
pub mod selection;
pub mod signals;

pub use affinity::rebuild_affinity;
pub use anchors::anchor_ranking;
pub use backtest::simulate;
pub use calibrate::{calibrate, reward, GRID};
pub use cycle::{pending_numbers, urgency_weights};
pub use filter::{is_structurally_valid, select_filtered, PRIMES};
pub use fusion::{confidence, fuse};
pub use regime::{bias_weights, classify, expected_bias};
pub use reinforce::{reinforce, ReinforceOutcome};
pub use score::ScoreBoard;
pub use selection::{compute_selection, record_prediction};
pub use signals::SignalSnapshot;

use serde::Deserialize;
use std::path::Path;

/// Tunable engine parameters.
///
/// Silent zones, delay bands and layer cut sizes are explicit configuration
/// rather than module constants so tests can substitute them. Loadable from
/// TOML; every field has the production default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed silent-zone layer: historically under-played numbers.
    pub silent_zone: Vec<u8>,
    /// Minimum popularity index for a draw to feed the popularity layer.
    pub popularity_cutoff: f64,
    /// Minimum popularity index for a draw to feed the affinity rebuild.
    pub affinity_cutoff: f64,
    /// Inclusive delay band for the momentum layer.
    pub momentum_min_delay: u32,
    pub momentum_max_delay: u32,
    /// Layer cut sizes.
    pub popularity_top: usize,
    pub neighborhood_top: usize,
    pub momentum_top: usize,
    pub noise_top: usize,
    /// Recent-window layer span, in draws.
    pub recent_window: usize,
    /// Size of the candidate pool fed to the combinatorial filter.
    pub candidate_pool: usize,
    /// Backtest window for routine calibration.
    pub backtest_window: usize,
    /// Widened backtest window used after a poor prediction.
    pub recalibration_window: usize,
    /// Seed for the engine's RNG.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            silent_zone: vec![41, 42, 43, 51, 52, 53, 54, 58, 59, 60],
            popularity_cutoff: 1.2,
            affinity_cutoff: 1.0,
            momentum_min_delay: 3,
            momentum_max_delay: 15,
            popularity_top: 15,
            neighborhood_top: 10,
            momentum_top: 10,
            noise_top: 10,
            recent_window: 20,
            candidate_pool: 12,
            backtest_window: 10,
            recalibration_window: 20,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file; missing fields take defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("could not read config {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse config {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.silent_zone.len(), 10);
        assert_eq!(cfg.momentum_min_delay, 3);
        assert_eq!(cfg.momentum_max_delay, 15);
        assert_eq!(cfg.candidate_pool, 12);
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let cfg: EngineConfig = toml::from_str("backtest_window = 25\nseed = 7\n").unwrap();
        assert_eq!(cfg.backtest_window, 25);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.recent_window, 20);
        assert_eq!(cfg.silent_zone, vec![41, 42, 43, 51, 52, 53, 54, 58, 59, 60]);
    }
}
