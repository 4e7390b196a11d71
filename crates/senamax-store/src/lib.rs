//! Senamax Store
//!
//! The Historical Data Accessor seam. The engine sees history only through
//! the [`HistoryStore`] trait; relational persistence lives behind it as an
//! external collaborator. [`MemoryStore`] is the deterministic in-memory
//! implementation used by the runner and by tests.
//!
//! Every trait call is a short, independent transaction: no call spans
//! another, and storage failures surface unchanged as [`StoreError`].

pub mod memory;

pub use memory::MemoryStore;

use senamax_models::{Draw, PredictionRecord, WeightConfig};
use serde::{Deserialize, Serialize};

/// Storage-layer failure. Propagated to the caller unchanged; the engine
/// performs no retries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// One undirected pair of the affinity matrix.
///
/// Stored once per unordered pair with `a < b`; `weight` is the count of
/// filtered historical draws containing both numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityPair {
    pub a: u8,
    pub b: u8,
    pub weight: u32,
}

/// Read/write surface over historical draws and engine persistence.
///
/// Ranked outputs are fully deterministic: descending by the ranking value,
/// ascending by number on ties.
pub trait HistoryStore {
    /// The `n` most recent draws, most recent first.
    fn recent_draws(&self, n: usize) -> Result<Vec<Draw>, StoreError>;

    /// Total number of stored draws.
    fn draw_count(&self) -> Result<usize, StoreError>;

    /// All-time frequency per number, highest count first.
    fn frequency_all(&self) -> Result<Vec<(u8, u32)>, StoreError>;

    /// Frequency per number inside the last `window` draws, highest first.
    /// Numbers absent from the window are omitted.
    fn frequency_recent(&self, window: usize) -> Result<Vec<(u8, u32)>, StoreError>;

    /// Every number that has appeared at least once, with its delay (draws
    /// since last seen; a number in the latest draw has delay 0), most
    /// delayed first. Never-seen numbers are omitted.
    fn delay_ranked(&self) -> Result<Vec<(u8, u32)>, StoreError>;

    /// Draws whose popularity index is at least `min_index`.
    fn popular_draws(&self, min_index: f64) -> Result<Vec<Draw>, StoreError>;

    /// Numbers ranked by total affinity weight across all stored pairs
    /// touching them, strongest first, capped at `n`.
    fn affinity_top(&self, n: usize) -> Result<Vec<u8>, StoreError>;

    /// Replace the entire affinity matrix (delete-then-reinsert semantics).
    fn replace_affinity(&mut self, pairs: Vec<AffinityPair>) -> Result<(), StoreError>;

    /// Current persisted weight configuration, if any.
    fn weight_config_read(&self) -> Result<Option<WeightConfig>, StoreError>;

    /// Overwrite the persisted weight configuration.
    fn weight_config_write(&mut self, config: &WeightConfig) -> Result<(), StoreError>;

    /// Prediction targeting `target_id`, if one was recorded.
    fn prediction_read(&self, target_id: u32) -> Result<Option<PredictionRecord>, StoreError>;

    /// Record (or supersede) the prediction for its target id.
    fn prediction_write(&mut self, record: &PredictionRecord) -> Result<(), StoreError>;
}
