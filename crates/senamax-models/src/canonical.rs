//! Canonical binary encoding for deterministic config hashing.
//!
//! JSON text hashing is not stable enough to identify a configuration:
//! floats serialize inconsistently and optional fields may be omitted or
//! defaulted. Configs therefore encode to a fixed-order binary form behind a
//! version byte and are hashed with SHA-256.

use sha2::{Digest, Sha256};

/// Config encoding version. Bump when encoding rules change.
pub const CONFIG_ENCODING_VERSION: u8 = 0x01;

/// Exponent used when quantizing weight values for encoding.
/// A weight of 1.5 encodes as mantissa 15_000.
pub const WEIGHT_EXPONENT: i8 = -4;

/// Deterministic binary encoding of a config struct.
///
/// Implementations encode fields in declaration order with no padding or
/// platform-dependent representations. The first byte MUST be
/// [`CONFIG_ENCODING_VERSION`].
pub trait CanonicalBytes {
    fn canonical_bytes(&self) -> Vec<u8>;
}

/// SHA-256 hex digest of a config's canonical bytes.
pub fn canonical_hash<T: CanonicalBytes>(value: &T) -> String {
    let hash = Sha256::digest(value.canonical_bytes());
    hex::encode(hash)
}

/// Encode i64 as 8 little-endian bytes.
#[inline]
pub fn encode_i64(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Encode u32 as 4 little-endian bytes.
#[inline]
pub fn encode_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Quantize a weight to its encoding mantissa at [`WEIGHT_EXPONENT`].
#[inline]
pub fn weight_mantissa(weight: f64) -> i64 {
    (weight * 10f64.powi(-(WEIGHT_EXPONENT as i32))).round() as i64
}

/// Encode a weight as its quantized mantissa.
#[inline]
pub fn encode_weight(buf: &mut Vec<u8>, weight: f64) {
    encode_i64(buf, weight_mantissa(weight));
}
