//! Deterministic in-memory history store.

use crate::{AffinityPair, HistoryStore, StoreError};
use senamax_models::{Draw, PredictionRecord, WeightConfig, MAX_NUMBER, MIN_NUMBER};
use std::collections::BTreeMap;

/// In-memory [`HistoryStore`].
///
/// Draws are kept ordered by ascending id; all aggregates are recomputed per
/// call from that single source of truth, so reads never observe partially
/// updated state.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    draws: Vec<Draw>,
    affinity: Vec<AffinityPair>,
    config: Option<WeightConfig>,
    predictions: BTreeMap<u32, PredictionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an unordered batch of draws.
    pub fn with_draws(mut draws: Vec<Draw>) -> Self {
        draws.sort_by_key(|d| d.id);
        Self {
            draws,
            ..Self::default()
        }
    }

    /// Insert one draw, keeping id order. A draw with an existing id
    /// replaces the stored one.
    pub fn insert_draw(&mut self, draw: Draw) {
        match self.draws.binary_search_by_key(&draw.id, |d| d.id) {
            Ok(pos) => self.draws[pos] = draw,
            Err(pos) => self.draws.insert(pos, draw),
        }
    }

    /// Highest stored draw id, if any draws exist.
    pub fn latest_id(&self) -> Option<u32> {
        self.draws.last().map(|d| d.id)
    }

    /// All stored prediction records, ascending by target id.
    pub fn predictions(&self) -> Vec<PredictionRecord> {
        self.predictions.values().cloned().collect()
    }

    /// Count frequencies over an iterator of draws, ranked descending with
    /// ascending-number tie-break. Numbers with zero count are omitted.
    fn ranked_counts<'a>(draws: impl Iterator<Item = &'a Draw>) -> Vec<(u8, u32)> {
        let mut counts = [0u32; (MAX_NUMBER as usize) + 1];
        for draw in draws {
            for &n in &draw.numbers {
                counts[n as usize] += 1;
            }
        }
        let mut ranked: Vec<(u8, u32)> = (MIN_NUMBER..=MAX_NUMBER)
            .filter(|&n| counts[n as usize] > 0)
            .map(|n| (n, counts[n as usize]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

impl HistoryStore for MemoryStore {
    fn recent_draws(&self, n: usize) -> Result<Vec<Draw>, StoreError> {
        Ok(self.draws.iter().rev().take(n).cloned().collect())
    }

    fn draw_count(&self) -> Result<usize, StoreError> {
        Ok(self.draws.len())
    }

    fn frequency_all(&self) -> Result<Vec<(u8, u32)>, StoreError> {
        Ok(Self::ranked_counts(self.draws.iter()))
    }

    fn frequency_recent(&self, window: usize) -> Result<Vec<(u8, u32)>, StoreError> {
        Ok(Self::ranked_counts(self.draws.iter().rev().take(window)))
    }

    fn delay_ranked(&self) -> Result<Vec<(u8, u32)>, StoreError> {
        let mut delays: Vec<(u8, u32)> = (MIN_NUMBER..=MAX_NUMBER)
            .filter_map(|n| {
                self.draws
                    .iter()
                    .rev()
                    .position(|d| d.contains(n))
                    .map(|pos| (n, pos as u32))
            })
            .collect();
        delays.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(delays)
    }

    fn popular_draws(&self, min_index: f64) -> Result<Vec<Draw>, StoreError> {
        Ok(self
            .draws
            .iter()
            .filter(|d| d.popularity_index >= min_index)
            .cloned()
            .collect())
    }

    fn affinity_top(&self, n: usize) -> Result<Vec<u8>, StoreError> {
        let mut strength = [0u64; (MAX_NUMBER as usize) + 1];
        for pair in &self.affinity {
            strength[pair.a as usize] += pair.weight as u64;
            strength[pair.b as usize] += pair.weight as u64;
        }
        let mut ranked: Vec<(u8, u64)> = (MIN_NUMBER..=MAX_NUMBER)
            .filter(|&num| strength[num as usize] > 0)
            .map(|num| (num, strength[num as usize]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(ranked.into_iter().take(n).map(|(num, _)| num).collect())
    }

    fn replace_affinity(&mut self, pairs: Vec<AffinityPair>) -> Result<(), StoreError> {
        self.affinity = pairs;
        Ok(())
    }

    fn weight_config_read(&self) -> Result<Option<WeightConfig>, StoreError> {
        Ok(self.config)
    }

    fn weight_config_write(&mut self, config: &WeightConfig) -> Result<(), StoreError> {
        self.config = Some(*config);
        Ok(())
    }

    fn prediction_read(&self, target_id: u32) -> Result<Option<PredictionRecord>, StoreError> {
        Ok(self.predictions.get(&target_id).cloned())
    }

    fn prediction_write(&mut self, record: &PredictionRecord) -> Result<(), StoreError> {
        self.predictions.insert(record.target_draw_id, record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draw(id: u32, numbers: [u8; 6]) -> Draw {
        Draw::new(id, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), numbers).unwrap()
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::with_draws(vec![
            draw(1, [1, 2, 3, 4, 5, 6]),
            draw(2, [1, 2, 3, 10, 11, 12]),
            draw(3, [1, 20, 21, 22, 23, 24]),
        ])
    }

    #[test]
    fn test_recent_draws_most_recent_first() {
        let store = sample_store();
        let recent = store.recent_draws(2).unwrap();
        assert_eq!(recent[0].id, 3);
        assert_eq!(recent[1].id, 2);
    }

    #[test]
    fn test_frequency_all_ranked_with_tie_break() {
        let store = sample_store();
        let freq = store.frequency_all().unwrap();
        // 1 appears 3x, then 2 and 3 tie at 2x (numeric order), rest 1x.
        assert_eq!(freq[0], (1, 3));
        assert_eq!(freq[1], (2, 2));
        assert_eq!(freq[2], (3, 2));
        assert!(freq.iter().all(|&(_, c)| c > 0));
    }

    #[test]
    fn test_frequency_recent_window() {
        let store = sample_store();
        let freq = store.frequency_recent(1).unwrap();
        // Only draw 3 in window; six numbers, each once.
        assert_eq!(freq.len(), 6);
        assert_eq!(freq[0], (1, 1));
    }

    #[test]
    fn test_delay_ranked_semantics() {
        let store = sample_store();
        let delays = store.delay_ranked().unwrap();
        let delay_of = |n: u8| delays.iter().find(|&&(m, _)| m == n).unwrap().1;
        // 1 appeared in the latest draw.
        assert_eq!(delay_of(1), 0);
        // 10 last appeared one draw back.
        assert_eq!(delay_of(10), 1);
        // 4 last appeared two draws back.
        assert_eq!(delay_of(4), 2);
        // 60 never appeared: absent from the ranking.
        assert!(delays.iter().all(|&(n, _)| n != 60));
        // Most delayed first.
        assert!(delays.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_popular_draws_filter() {
        let mut store = sample_store();
        store.insert_draw(draw(4, [31, 32, 33, 34, 35, 36]).with_popularity(1.5));
        let popular = store.popular_draws(1.2).unwrap();
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].id, 4);
        // Neutral draws pass a 1.0 cutoff.
        assert_eq!(store.popular_draws(1.0).unwrap().len(), 4);
    }

    #[test]
    fn test_affinity_replace_and_rank() {
        let mut store = MemoryStore::new();
        store
            .replace_affinity(vec![
                AffinityPair { a: 5, b: 9, weight: 4 },
                AffinityPair { a: 9, b: 30, weight: 2 },
                AffinityPair { a: 5, b: 30, weight: 1 },
            ])
            .unwrap();
        // 9: 4+2=6, 5: 4+1=5, 30: 2+1=3.
        assert_eq!(store.affinity_top(3).unwrap(), vec![9, 5, 30]);
        assert_eq!(store.affinity_top(1).unwrap(), vec![9]);

        store.replace_affinity(vec![]).unwrap();
        assert!(store.affinity_top(5).unwrap().is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.weight_config_read().unwrap().is_none());
        let config = WeightConfig::default();
        store.weight_config_write(&config).unwrap();
        assert_eq!(store.weight_config_read().unwrap(), Some(config));
    }

    #[test]
    fn test_prediction_upsert() {
        let mut store = MemoryStore::new();
        let first = PredictionRecord::new(7, [1, 2, 3, 4, 5, 6], WeightConfig::default());
        store.prediction_write(&first).unwrap();
        let second = PredictionRecord::new(7, [10, 20, 30, 40, 50, 60], WeightConfig::default());
        store.prediction_write(&second).unwrap();
        assert_eq!(store.prediction_read(7).unwrap(), Some(second));
        assert!(store.prediction_read(8).unwrap().is_none());
    }

    #[test]
    fn test_insert_draw_replaces_same_id() {
        let mut store = sample_store();
        store.insert_draw(draw(2, [40, 41, 42, 43, 44, 45]));
        assert_eq!(store.draw_count().unwrap(), 3);
        let recent = store.recent_draws(3).unwrap();
        assert!(recent[1].contains(40));
    }
}
