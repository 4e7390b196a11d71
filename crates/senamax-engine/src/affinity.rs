//! Affinity matrix rebuild.
//!
//! The matrix is a pairwise co-occurrence count over the popularity-filtered
//! subset of history. It is always rebuilt from scratch and swapped in
//! wholesale; there is no incremental update path.

use crate::EngineConfig;
use senamax_store::{AffinityPair, HistoryStore, StoreError};
use std::collections::BTreeMap;
use tracing::info;

/// Recompute every pairwise connection and replace the stored matrix.
///
/// Each unordered pair is stored once with `a < b`; its weight is the count
/// of filtered draws containing both numbers. Returns the number of pairs
/// written.
pub fn rebuild_affinity<S: HistoryStore>(
    store: &mut S,
    cfg: &EngineConfig,
) -> Result<usize, StoreError> {
    let draws = store.popular_draws(cfg.affinity_cutoff)?;

    let mut connections: BTreeMap<(u8, u8), u32> = BTreeMap::new();
    for draw in &draws {
        let mut numbers = draw.numbers;
        numbers.sort_unstable();
        for i in 0..numbers.len() {
            for j in i + 1..numbers.len() {
                *connections.entry((numbers[i], numbers[j])).or_insert(0) += 1;
            }
        }
    }

    let pairs: Vec<AffinityPair> = connections
        .into_iter()
        .map(|((a, b), weight)| AffinityPair { a, b, weight })
        .collect();
    let count = pairs.len();

    store.replace_affinity(pairs)?;
    info!(draws = draws.len(), pairs = count, "affinity matrix rebuilt");
    Ok(count)
}
