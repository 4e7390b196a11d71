//! Stored predictions awaiting audit.

use crate::config::WeightConfig;
use crate::draw::DRAW_SIZE;
use serde::{Deserialize, Serialize};

/// A forecast recorded before its target draw occurs.
///
/// One record exists per target id; a newer prediction for the same target
/// replaces the old one. The reinforcement trigger reads it back once the
/// real draw arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Draw id this prediction targets (latest known id + 1 at record time).
    pub target_draw_id: u32,
    /// The six predicted numbers, sorted ascending.
    pub numbers: [u8; DRAW_SIZE],
    /// Weight configuration in force when the prediction was made.
    pub config: WeightConfig,
}

impl PredictionRecord {
    pub fn new(target_draw_id: u32, mut numbers: [u8; DRAW_SIZE], config: WeightConfig) -> Self {
        numbers.sort_unstable();
        Self {
            target_draw_id,
            numbers,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_stored_sorted() {
        let record = PredictionRecord::new(10, [33, 4, 60, 1, 18, 29], WeightConfig::default());
        assert_eq!(record.numbers, [1, 4, 18, 29, 33, 60]);
    }
}
