//! Historical draw records.
//!
//! A [`Draw`] is created by ingestion and never mutated by the engine; every
//! signal provider reads draws through the store seam. Construction validates
//! the 6-distinct-numbers-in-range invariant so downstream code never has to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Smallest playable number.
pub const MIN_NUMBER: u8 = 1;
/// Largest playable number.
pub const MAX_NUMBER: u8 = 60;
/// Numbers per draw.
pub const DRAW_SIZE: usize = 6;

/// Validation failures when constructing a [`Draw`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("number {number} outside [1,60]")]
    OutOfRange { number: u8 },

    #[error("duplicate number {number}")]
    Duplicate { number: u8 },
}

/// Coarse structural label of a draw.
///
/// Derived from the draw's sum/parity/rollover profile; persisted by
/// ingestion, re-derivable by the engine's classifier when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Ordered,
    Chaotic,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Ordered => write!(f, "ordered"),
            Regime::Chaotic => write!(f, "chaotic"),
        }
    }
}

/// One historical lottery outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    /// Monotonic draw identifier.
    pub id: u32,
    /// Date the draw took place.
    pub date: NaiveDate,
    /// The six winning numbers, as drawn (not necessarily sorted).
    pub numbers: [u8; DRAW_SIZE],
    /// Whether the jackpot rolled over.
    #[serde(default)]
    pub rolled_over: bool,
    /// Structural regime label, if ingestion has classified this draw.
    #[serde(default)]
    pub regime: Option<Regime>,
    /// Popularity index of this draw (how "intuitive" its numbers were).
    /// Computed by ingestion; 1.0 is neutral.
    #[serde(default = "default_popularity")]
    pub popularity_index: f64,
}

fn default_popularity() -> f64 {
    1.0
}

impl Draw {
    /// Construct a validated draw.
    pub fn new(id: u32, date: NaiveDate, numbers: [u8; DRAW_SIZE]) -> Result<Self, DrawError> {
        let draw = Self {
            id,
            date,
            numbers,
            rolled_over: false,
            regime: None,
            popularity_index: 1.0,
        };
        draw.validate()?;
        Ok(draw)
    }

    /// Validate an already-deserialized draw.
    pub fn validate(&self) -> Result<(), DrawError> {
        let mut seen = BTreeSet::new();
        for &n in &self.numbers {
            if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
                return Err(DrawError::OutOfRange { number: n });
            }
            if !seen.insert(n) {
                return Err(DrawError::Duplicate { number: n });
            }
        }
        Ok(())
    }

    /// Set the rollover flag.
    pub fn with_rollover(mut self, rolled_over: bool) -> Self {
        self.rolled_over = rolled_over;
        self
    }

    /// Set the popularity index.
    pub fn with_popularity(mut self, index: f64) -> Self {
        self.popularity_index = index;
        self
    }

    /// Set the regime label.
    pub fn with_regime(mut self, regime: Regime) -> Self {
        self.regime = Some(regime);
        self
    }

    /// The winning numbers as a sorted set.
    pub fn number_set(&self) -> BTreeSet<u8> {
        self.numbers.iter().copied().collect()
    }

    /// Whether `n` was drawn.
    pub fn contains(&self, n: u8) -> bool {
        self.numbers.contains(&n)
    }

    /// Count of numbers shared with `selection`.
    pub fn hits(&self, selection: &[u8]) -> usize {
        selection.iter().filter(|n| self.contains(**n)).count()
    }
}
