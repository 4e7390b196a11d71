//! Senamax Models
//!
//! Core domain types for the selection engine:
//!
//! - [`Draw`]: one immutable historical outcome (6 distinct numbers in 1–60,
//!   date, rollover flag, optional regime label, popularity index).
//! - [`WeightConfig`]: the tunable per-layer weights, canonically hashable.
//! - [`PredictionRecord`]: a stored forecast targeting a future draw id.
//! - Report types returned by the engine surface ([`SelectionReport`],
//!   [`SimulationReport`], [`Confidence`]).
//!
//! All types are plain data: no I/O, no hidden state, deterministic
//! serialization via serde.

pub mod canonical;
pub mod config;
pub mod draw;
pub mod prediction;
pub mod report;

pub use canonical::{CanonicalBytes, canonical_hash, CONFIG_ENCODING_VERSION};
pub use config::WeightConfig;
pub use draw::{Draw, DrawError, Regime, DRAW_SIZE, MAX_NUMBER, MIN_NUMBER};
pub use prediction::PredictionRecord;
pub use report::{
    BaseSelections, Confidence, ConfidenceLevel, DrawHits, MetaSelections, SelectionDebug,
    SelectionReport, SimulationReport,
};
