//! Draw regime classification and scoring bias.
//!
//! A draw is "ordered" when it conforms to the structural profile most real
//! draws share (sum band, balanced parity, no rollover); anything else is
//! "chaotic". The aggregator reads the last three labels and biases the next
//! pass the other way — a mean-reversion rule, not a continuous model.

use senamax_models::{Draw, Regime, WeightConfig};

/// Sum band shared by the classifier and the structural candidate filter.
pub const SUM_BAND: (u32, u32) = (150, 220);

/// Classify one draw from its structural profile.
///
/// Chaotic when any of: sum outside the band, even-count outside {2,3,4},
/// or the jackpot rolled over.
pub fn classify(numbers: &[u8], rolled_over: bool) -> Regime {
    let sum: u32 = numbers.iter().map(|&n| n as u32).sum();
    let evens = numbers.iter().filter(|&&n| n % 2 == 0).count();

    let mut chaotic = false;
    if !(SUM_BAND.0..=SUM_BAND.1).contains(&sum) {
        chaotic = true;
    }
    if !(2..=4).contains(&evens) {
        chaotic = true;
    }
    if rolled_over {
        chaotic = true;
    }

    if chaotic {
        Regime::Chaotic
    } else {
        Regime::Ordered
    }
}

/// Label of a draw: the persisted label when present, otherwise derived.
pub fn label_of(draw: &Draw) -> Regime {
    draw.regime
        .unwrap_or_else(|| classify(&draw.numbers, draw.rolled_over))
}

/// Bias expected for the next draw, from the most recent labels
/// (most recent first).
///
/// At least 2 chaotic out of the last 3 → expect reversion to ordered;
/// otherwise expect chaos.
pub fn expected_bias(recent: &[Regime]) -> Regime {
    let chaotic = recent
        .iter()
        .take(3)
        .filter(|r| **r == Regime::Chaotic)
        .count();
    if chaotic >= 2 {
        Regime::Ordered
    } else {
        Regime::Chaotic
    }
}

/// Apply the regime boost branch to a weight configuration.
///
/// Exactly one branch fires per scoring pass: an ordered bias strengthens
/// the popularity (×1.5) and neighborhood (×1.2) layers; a chaotic bias
/// strengthens silence (×2.0) and momentum (×1.5).
pub fn bias_weights(weights: WeightConfig, bias: Regime) -> WeightConfig {
    let mut biased = weights;
    match bias {
        Regime::Ordered => {
            biased.popularity *= 1.5;
            biased.neighborhood *= 1.2;
        }
        Regime::Chaotic => {
            biased.silence *= 2.0;
            biased.momentum *= 1.5;
        }
    }
    biased
}
