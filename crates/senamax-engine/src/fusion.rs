//! Fusion of an external model selection with the statistical selection.
//!
//! The model selection arrives through the external boundary (the regressor
//! itself is not part of this engine). Fusion keeps the statistical core and
//! lets the model refine the tail: shared numbers first, then statistical
//! picks up to five, then model picks up to six.

use senamax_models::{Confidence, DRAW_SIZE};

/// Merge a model selection with the statistical selection.
///
/// Returns up to six distinct numbers, sorted ascending; exactly six when
/// both inputs carry six distinct numbers.
pub fn fuse(model: &[u8], statistical: &[u8]) -> Vec<u8> {
    let mut fused: Vec<u8> = model
        .iter()
        .filter(|n| statistical.contains(n))
        .copied()
        .collect();

    for &n in statistical {
        if fused.len() >= DRAW_SIZE - 1 {
            break;
        }
        if !fused.contains(&n) {
            fused.push(n);
        }
    }

    for &n in model {
        if fused.len() >= DRAW_SIZE {
            break;
        }
        if !fused.contains(&n) {
            fused.push(n);
        }
    }

    fused.sort_unstable();
    fused.dedup();
    fused.truncate(DRAW_SIZE);
    fused
}

/// Grade agreement between two selections by overlap size.
pub fn confidence(a: &[u8], b: &[u8]) -> Confidence {
    let shared = a.iter().filter(|n| b.contains(n)).count();
    Confidence::from_overlap(shared)
}
