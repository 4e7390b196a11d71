//! Performance simulation of a fixed selection.

use senamax_models::{DrawHits, SimulationReport};
use senamax_store::{HistoryStore, StoreError};

/// Replay `selection` against the last `window` real draws.
///
/// Records run oldest draw first so hit curves read left to right. With
/// fewer than `window` draws the replay covers what exists.
pub fn simulate<S: HistoryStore>(
    store: &S,
    selection: &[u8],
    window: usize,
) -> Result<SimulationReport, StoreError> {
    let mut draws = store.recent_draws(window)?;
    draws.reverse();

    let records: Vec<DrawHits> = draws
        .iter()
        .map(|draw| DrawHits {
            draw_id: draw.id,
            hits: draw.hits(selection),
        })
        .collect();

    Ok(SimulationReport::from_records(records))
}
