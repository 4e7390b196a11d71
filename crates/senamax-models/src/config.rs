//! Layer weight configuration.
//!
//! Exactly one "current" [`WeightConfig`] is persisted through the store; the
//! calibrator overwrites it wholesale after each optimization pass. When no
//! persisted config exists the engine substitutes [`WeightConfig::default`].

use crate::canonical::{encode_weight, CanonicalBytes, CONFIG_ENCODING_VERSION};
use serde::{Deserialize, Serialize};

/// Scalar weight per scoring layer.
///
/// The calibrator tunes `popularity`, `neighborhood` and `momentum` over a
/// discrete grid; `silence` stays fixed at 1.0 during calibration. Invariant:
/// a persisted config never carries a non-positive weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Weight of the popularity layer (high-popularity-draw frequency).
    pub popularity: f64,
    /// Weight of the neighborhood layer (pairwise affinity strength).
    pub neighborhood: f64,
    /// Weight of the silent-zone layer (fixed under-represented set).
    pub silence: f64,
    /// Weight of the delay-momentum layer (target delay band).
    pub momentum: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            popularity: 3.0,
            neighborhood: 1.5,
            silence: 1.0,
            momentum: 2.0,
        }
    }
}

impl WeightConfig {
    /// All weights strictly positive.
    pub fn is_valid(&self) -> bool {
        self.popularity > 0.0 && self.neighborhood > 0.0 && self.silence > 0.0 && self.momentum > 0.0
    }
}

impl CanonicalBytes for WeightConfig {
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(CONFIG_ENCODING_VERSION);
        encode_weight(&mut buf, self.popularity);
        encode_weight(&mut buf, self.neighborhood);
        encode_weight(&mut buf, self.silence);
        encode_weight(&mut buf, self.momentum);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonical_hash;

    #[test]
    fn test_default_weights() {
        let config = WeightConfig::default();
        assert_eq!(config.popularity, 3.0);
        assert_eq!(config.neighborhood, 1.5);
        assert_eq!(config.silence, 1.0);
        assert_eq!(config.momentum, 2.0);
        assert!(config.is_valid());
    }

    #[test]
    fn test_non_positive_weight_invalid() {
        let config = WeightConfig {
            momentum: 0.0,
            ..WeightConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_canonical_hash_stable() {
        let c1 = WeightConfig::default();
        let c2 = WeightConfig::default();
        assert_eq!(canonical_hash(&c1), canonical_hash(&c2));

        let c3 = WeightConfig {
            popularity: 2.0,
            ..WeightConfig::default()
        };
        assert_ne!(canonical_hash(&c1), canonical_hash(&c3));
    }
}
