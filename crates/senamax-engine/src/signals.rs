//! Layer signal providers.
//!
//! Each provider is a pure function of store aggregates: a top-N parameter
//! in, a duplicate-free list of numbers out, best first where the layer has
//! a meaningful order. Thin history degrades to short or empty lists — a
//! missing layer never fails the scoring pass.

use crate::EngineConfig;
use senamax_store::{HistoryStore, StoreError};

/// All layer outputs for one scoring or calibration pass.
///
/// Collected once up front: the calibrator sweeps its weight grid over a
/// single snapshot, so layer recomputation cannot skew tuple comparison.
#[derive(Debug, Clone)]
pub struct SignalSnapshot {
    /// Frequency ranking inside high-popularity draws.
    pub popular: Vec<u8>,
    /// Affinity-matrix neighborhood ranking.
    pub neighbors: Vec<u8>,
    /// Fixed silent-zone set (configuration data, unordered).
    pub silent: Vec<u8>,
    /// Top all-time frequency, always weighted 1.0.
    pub noise: Vec<u8>,
    /// Numbers inside the target delay band, most urgent first.
    pub momentum: Vec<u8>,
}

impl SignalSnapshot {
    /// Gather every layer from the store.
    pub fn collect<S: HistoryStore>(store: &S, cfg: &EngineConfig) -> Result<Self, StoreError> {
        Ok(Self {
            popular: popularity_ranked(store, cfg.popularity_cutoff, cfg.popularity_top)?,
            neighbors: neighborhood_ranked(store, cfg.neighborhood_top)?,
            silent: cfg.silent_zone.clone(),
            noise: noise_ranked(store, cfg.noise_top)?,
            momentum: momentum_band(
                store,
                cfg.momentum_min_delay,
                cfg.momentum_max_delay,
                cfg.momentum_top,
            )?,
        })
    }
}

/// Numbers ranked by occurrence inside draws whose popularity index is at
/// least `min_index`, descending frequency.
pub fn popularity_ranked<S: HistoryStore>(
    store: &S,
    min_index: f64,
    top: usize,
) -> Result<Vec<u8>, StoreError> {
    let draws = store.popular_draws(min_index)?;
    let mut counts = [0u32; 61];
    for draw in &draws {
        for &n in &draw.numbers {
            counts[n as usize] += 1;
        }
    }
    let mut ranked: Vec<(u8, u32)> = (1..=60u8)
        .filter(|&n| counts[n as usize] > 0)
        .map(|n| (n, counts[n as usize]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(ranked.into_iter().take(top).map(|(n, _)| n).collect())
}

/// Numbers ranked by total incoming affinity weight, strongest first.
pub fn neighborhood_ranked<S: HistoryStore>(store: &S, top: usize) -> Result<Vec<u8>, StoreError> {
    store.affinity_top(top)
}

/// Numbers whose delay falls inside `[min_delay, max_delay]`, ascending by
/// delay (most urgent first), capped at `top`.
pub fn momentum_band<S: HistoryStore>(
    store: &S,
    min_delay: u32,
    max_delay: u32,
    top: usize,
) -> Result<Vec<u8>, StoreError> {
    let mut in_band: Vec<(u8, u32)> = store
        .delay_ranked()?
        .into_iter()
        .filter(|&(_, delay)| (min_delay..=max_delay).contains(&delay))
        .collect();
    in_band.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    Ok(in_band.into_iter().take(top).map(|(n, _)| n).collect())
}

/// Frequency ranking over the last `window` draws, descending.
pub fn recent_window_ranked<S: HistoryStore>(
    store: &S,
    window: usize,
    top: usize,
) -> Result<Vec<u8>, StoreError> {
    Ok(store
        .frequency_recent(window)?
        .into_iter()
        .take(top)
        .map(|(n, _)| n)
        .collect())
}

/// Top all-time frequency ("noise" layer), descending.
pub fn noise_ranked<S: HistoryStore>(store: &S, top: usize) -> Result<Vec<u8>, StoreError> {
    Ok(store
        .frequency_all()?
        .into_iter()
        .take(top)
        .map(|(n, _)| n)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use senamax_models::Draw;
    use senamax_store::{AffinityPair, MemoryStore};

    fn draw(id: u32, numbers: [u8; 6]) -> Draw {
        Draw::new(id, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), numbers).unwrap()
    }

    #[test]
    fn test_popularity_filters_and_ranks() {
        let mut store = MemoryStore::new();
        store.insert_draw(draw(1, [1, 2, 3, 4, 5, 6]).with_popularity(1.5));
        store.insert_draw(draw(2, [1, 2, 3, 10, 11, 12]).with_popularity(1.3));
        store.insert_draw(draw(3, [1, 50, 51, 52, 53, 54]).with_popularity(0.8));

        let ranked = popularity_ranked(&store, 1.2, 4).unwrap();
        // Draw 3 is below the cutoff; 1,2,3 appear twice, tie broken numerically.
        assert_eq!(ranked, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_popularity_empty_history() {
        let store = MemoryStore::new();
        assert!(popularity_ranked(&store, 1.2, 15).unwrap().is_empty());
    }

    #[test]
    fn test_momentum_band_orders_by_urgency() {
        let mut store = MemoryStore::new();
        // 20 draws; number 7 last seen 5 draws ago, number 9 last seen 3 ago.
        for id in 1..=20u32 {
            let numbers = match id {
                15 => [7, 31, 32, 33, 34, 35],
                17 => [9, 36, 37, 38, 39, 40],
                _ => [20, 21, 22, 23, 24, 25],
            };
            store.insert_draw(draw(id, numbers));
        }
        let band = momentum_band(&store, 3, 15, 10).unwrap();
        // 9 (delay 3) precedes 7 (delay 5); recently seen numbers fall
        // below the band and never-seen numbers are not ranked at all.
        let pos_9 = band.iter().position(|&n| n == 9).unwrap();
        let pos_7 = band.iter().position(|&n| n == 7).unwrap();
        assert!(pos_9 < pos_7);
        assert!(band.iter().all(|&n| n != 20 && n != 21));
    }

    #[test]
    fn test_recent_window_and_noise() {
        let mut store = MemoryStore::new();
        for id in 1..=30u32 {
            let base = if id <= 10 { [1, 2, 3, 4, 5, 6] } else { [7, 8, 9, 10, 11, 12] };
            store.insert_draw(draw(id, base));
        }
        let recent = recent_window_ranked(&store, 20, 3).unwrap();
        assert_eq!(recent, vec![7, 8, 9]);
        let noise = noise_ranked(&store, 3).unwrap();
        // 7..12 appear 20x vs 10x for 1..6.
        assert_eq!(noise, vec![7, 8, 9]);
    }

    #[test]
    fn test_snapshot_collects_all_layers() {
        let mut store = MemoryStore::new();
        store.insert_draw(draw(1, [1, 2, 3, 4, 5, 6]).with_popularity(1.5));
        store
            .replace_affinity(vec![AffinityPair { a: 1, b: 2, weight: 3 }])
            .unwrap();
        let cfg = EngineConfig::default();
        let snapshot = SignalSnapshot::collect(&store, &cfg).unwrap();
        assert!(!snapshot.popular.is_empty());
        assert_eq!(snapshot.neighbors, vec![1, 2]);
        assert_eq!(snapshot.silent, cfg.silent_zone);
        assert!(!snapshot.noise.is_empty());
    }
}
