//! Selection orchestration.
//!
//! One scoring pass: regime bias → base strategies → consensus pool →
//! weighted layer aggregation with bonuses → structural filtering. The pass
//! reads the store but never writes it; recording the resulting prediction
//! is a separate, explicit step.

use crate::cycle::{pending_numbers, urgency_weights};
use crate::filter::select_filtered;
use crate::regime::{bias_weights, expected_bias, label_of};
use crate::score::ScoreBoard;
use crate::signals::{recent_window_ranked, SignalSnapshot};
use crate::EngineConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use senamax_models::{
    BaseSelections, MetaSelections, PredictionRecord, SelectionDebug, SelectionReport,
    WeightConfig, DRAW_SIZE,
};
use senamax_store::{HistoryStore, StoreError};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Consensus bonus added to majority-vote numbers.
const CONSENSUS_BONUS: f64 = 2.0;

/// Numbers fed from each ranking into the consensus pool.
const POOL_CUT: usize = 15;

/// First `n` numbers of a ranked `(number, count)` list.
fn ranked_cut(ranked: &[(u8, u32)], n: usize) -> Vec<u8> {
    ranked.iter().take(n).map(|&(num, _)| num).collect()
}

/// Sorted first six of a ranked list.
fn sorted_six(ranked: &[u8]) -> Vec<u8> {
    let mut six: Vec<u8> = ranked.iter().take(DRAW_SIZE).copied().collect();
    six.sort_unstable();
    six
}

/// Sample `n` distinct numbers from `from`, returned sorted. Yields fewer
/// when the source is smaller than `n`.
fn sample_sorted<R: Rng>(from: &[u8], n: usize, rng: &mut R) -> Vec<u8> {
    let mut sampled: Vec<u8> = from.choose_multiple(rng, n).copied().collect();
    sampled.sort_unstable();
    sampled
}

/// Run one full scoring pass and produce the selection report.
pub fn compute_selection<S: HistoryStore, R: Rng>(
    store: &S,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<SelectionReport, StoreError> {
    // Regime bias from the last three draws' labels.
    let last_three = store.recent_draws(3)?;
    let labels: Vec<_> = last_three.iter().map(label_of).collect();
    let bias = expected_bias(&labels);

    // Current weights, defaulting when nothing is persisted yet.
    let weights = match store.weight_config_read()? {
        Some(config) => config,
        None => {
            warn!("no persisted weight configuration; using defaults");
            WeightConfig::default()
        }
    };
    let biased = bias_weights(weights, bias);

    // Base strategies.
    let freq_all = store.frequency_all()?;
    let delays = store.delay_ranked()?;

    let hot_pool = ranked_cut(&freq_all, POOL_CUT);
    let recent_pool = recent_window_ranked(store, cfg.recent_window, POOL_CUT)?;
    let overdue_pool = ranked_cut(&delays, POOL_CUT);
    let seen: Vec<u8> = freq_all.iter().map(|&(n, _)| n).collect();
    let random = sample_sorted(&seen, DRAW_SIZE, rng);

    // Consensus pool: majority vote across the base strategies.
    let mut votes = ScoreBoard::new();
    votes.add_layer(&hot_pool, 1.0);
    votes.add_layer(&recent_pool, 1.0);
    votes.add_layer(&overdue_pool, 1.0);
    votes.add_layer(&random, 1.0);
    let consensus = {
        let mut six = votes.top(DRAW_SIZE);
        six.sort_unstable();
        six
    };

    // Weighted layer aggregation.
    let snapshot = SignalSnapshot::collect(store, cfg)?;
    let mut board = ScoreBoard::new();
    board.add_layer(&snapshot.popular, biased.popularity);
    board.add_layer(&snapshot.neighbors, biased.neighborhood);
    board.add_layer(&snapshot.silent, biased.silence);
    board.add_layer(&snapshot.noise, 1.0);
    board.add_layer(&snapshot.momentum, biased.momentum);

    // Cycle-urgency bonus.
    let all_draws = store.recent_draws(store.draw_count()?)?;
    let pending = pending_numbers(&all_draws);
    for (&n, &bonus) in urgency_weights(&pending).iter() {
        board.add(n, bonus);
    }

    // Consensus bonus.
    board.add_layer(&consensus, CONSENSUS_BONUS);

    // Final selections.
    let filtered = select_filtered(&board, cfg.candidate_pool);
    let blend_pool: Vec<u8> = filtered
        .iter()
        .chain(consensus.iter())
        .copied()
        .collect::<BTreeSet<u8>>()
        .into_iter()
        .collect();
    let blended = sample_sorted(&blend_pool, DRAW_SIZE, rng);

    debug!(
        regime = %bias,
        pending = pending.len(),
        "scoring pass complete"
    );

    Ok(SelectionReport {
        base: BaseSelections {
            hot: sorted_six(&hot_pool),
            recent: sorted_six(&recent_pool),
            overdue: sorted_six(&overdue_pool),
            random,
        },
        meta: MetaSelections {
            filtered,
            consensus,
            blended,
        },
        debug: SelectionDebug {
            regime_bias: bias,
            pending_count: pending.len(),
        },
    })
}

/// Record a prediction targeting the next draw (latest id + 1), superseding
/// any earlier record for that target.
pub fn record_prediction<S: HistoryStore>(
    store: &mut S,
    selection: &[u8],
    config: WeightConfig,
) -> Result<u32, StoreError> {
    let target_id = store
        .recent_draws(1)?
        .first()
        .map(|d| d.id + 1)
        .unwrap_or(1);

    let mut numbers = [0u8; DRAW_SIZE];
    for (slot, &n) in numbers.iter_mut().zip(selection.iter()) {
        *slot = n;
    }
    let record = PredictionRecord::new(target_id, numbers, config);
    store.prediction_write(&record)?;
    Ok(target_id)
}
