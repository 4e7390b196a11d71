//! Typed outputs of the engine surface.
//!
//! These are the shapes the (external) service layer serializes; the engine
//! never reports through loose JSON maps.

use crate::draw::Regime;
use serde::{Deserialize, Serialize};

/// The four independent base-strategy selections, each sorted ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSelections {
    /// Top all-time frequency.
    pub hot: Vec<u8>,
    /// Top frequency inside the recent window.
    pub recent: Vec<u8>,
    /// Most draws since last seen.
    pub overdue: Vec<u8>,
    /// Uniform seeded draw over historically seen numbers.
    pub random: Vec<u8>,
}

/// Meta-level selections built on top of the base strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaSelections {
    /// The weighted-score selection after structural filtering.
    pub filtered: Vec<u8>,
    /// Majority-vote pool across the base strategies.
    pub consensus: Vec<u8>,
    /// Seeded blend of `filtered` and `consensus`.
    pub blended: Vec<u8>,
}

/// Diagnostic context attached to a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionDebug {
    /// Regime the aggregator biased toward for the next draw.
    pub regime_bias: Regime,
    /// Numbers still pending in the current 1–60 cycle.
    pub pending_count: usize,
}

/// Full output of one scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub base: BaseSelections,
    pub meta: MetaSelections,
    pub debug: SelectionDebug,
}

/// Hit count of a fixed selection against one historical draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawHits {
    pub draw_id: u32,
    pub hits: usize,
}

/// Replay of a fixed selection against recent history, oldest draw first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub records: Vec<DrawHits>,
    /// Draws with exactly 4 hits.
    pub four_hits: u32,
    /// Draws with exactly 5 hits.
    pub five_hits: u32,
    /// Draws with all 6 hits.
    pub six_hits: u32,
}

impl SimulationReport {
    /// Build a report from per-draw records, tallying prize tiers.
    pub fn from_records(records: Vec<DrawHits>) -> Self {
        let mut four_hits = 0;
        let mut five_hits = 0;
        let mut six_hits = 0;
        for r in &records {
            match r.hits {
                4 => four_hits += 1,
                5 => five_hits += 1,
                6 => six_hits += 1,
                _ => {}
            }
        }
        Self {
            records,
            four_hits,
            five_hits,
            six_hits,
        }
    }
}

/// Confidence grade for an externally fused selection pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Confidence in the agreement between two independent selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confidence {
    pub level: ConfidenceLevel,
    /// Display percentage associated with the level.
    pub percent: u8,
}

impl Confidence {
    /// Grade from the overlap count between two 6-number selections.
    pub fn from_overlap(shared: usize) -> Self {
        if shared >= 3 {
            Self {
                level: ConfidenceLevel::High,
                percent: 85,
            }
        } else if shared == 2 {
            Self {
                level: ConfidenceLevel::Medium,
                percent: 60,
            }
        } else {
            Self {
                level: ConfidenceLevel::Low,
                percent: 35,
            }
        }
    }
}
