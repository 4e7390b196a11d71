//! Cycle pendency tracking.
//!
//! A cycle closes when every number 1–60 has appeared at least once over a
//! span of consecutive draws. Walking history backward from the most recent
//! draw, the numbers still missing when the previous cycle's closure is
//! reached are "pending" for the current, still-open cycle.

use senamax_models::{Draw, MAX_NUMBER, MIN_NUMBER};
use std::collections::{BTreeMap, BTreeSet};

/// Numbers not yet seen in the current cycle.
///
/// `draws` is most recent first. The walk stops as soon as the working set
/// empties (a full cycle closed exactly there) or history runs out; the set
/// is empty iff the stop was a closure.
pub fn pending_numbers(draws: &[Draw]) -> BTreeSet<u8> {
    let mut pending: BTreeSet<u8> = (MIN_NUMBER..=MAX_NUMBER).collect();
    for draw in draws {
        for &n in &draw.numbers {
            pending.remove(&n);
        }
        if pending.is_empty() {
            break;
        }
    }
    pending
}

/// Urgency bonus per pending number.
///
/// Near cycle closure the bonus grows sharply: `max(0.5, 20.0 / pending)`
/// when fewer than 15 numbers remain, flat 0.5 otherwise. An empty pending
/// set yields no bonuses.
pub fn urgency_weights(pending: &BTreeSet<u8>) -> BTreeMap<u8, f64> {
    let count = pending.len();
    if count == 0 {
        return BTreeMap::new();
    }
    let bonus = if count < 15 {
        (20.0 / count as f64).max(0.5)
    } else {
        0.5
    };
    pending.iter().map(|&n| (n, bonus)).collect()
}
