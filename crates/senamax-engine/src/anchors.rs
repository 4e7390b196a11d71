//! Anchor analysis of a historical draw.
//!
//! Ranks a draw's numbers by "popular appeal" — how likely casual players
//! are to have picked them. Calendar numbers, round/lucky finals and doubled
//! digits carry most of the small-prize traffic.

use senamax_store::{HistoryStore, StoreError};

/// Doubled-digit numbers inside the playable range.
const DOUBLED: [u8; 5] = [11, 22, 33, 44, 55];

/// Appeal weight of one number.
fn appeal(n: u8) -> u32 {
    let mut weight = 0;
    // Calendar numbers (days of the month).
    if (1..=31).contains(&n) {
        weight += 10;
    }
    // Round or lucky final digit.
    if matches!(n % 10, 0 | 7) {
        weight += 5;
    }
    if DOUBLED.contains(&n) {
        weight += 7;
    }
    weight
}

/// Rank the numbers of one draw by descending appeal, ascending number on
/// ties. Returns an empty list for an unknown draw id.
pub fn anchor_ranking<S: HistoryStore>(store: &S, draw_id: u32) -> Result<Vec<u8>, StoreError> {
    let draw = store
        .recent_draws(store.draw_count()?)?
        .into_iter()
        .find(|d| d.id == draw_id);

    let Some(draw) = draw else {
        return Ok(Vec::new());
    };

    let mut ranked = draw.numbers.to_vec();
    ranked.sort_by(|&a, &b| appeal(b).cmp(&appeal(a)).then(a.cmp(&b)));
    Ok(ranked)
}
