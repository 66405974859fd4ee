//! Wire-level type definitions for threshold BLS signing.
//!
//! These are plain byte containers. They carry keys, shares and signatures
//! between processes in the standard BLS12-381 encodings and know nothing
//! about curve arithmetic; decoding into checked group elements happens in
//! `tbls_crypto`.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use thiserror::Error;
use zeroize::Zeroize;

pub mod sign_hash;

pub use sign_hash::{build_sign_hash, Hash, HASH_SIZE};

/// Size of a compressed G1 point.
pub const G1_POINT_SIZE: usize = 48;
/// Size of a compressed G2 point.
pub const G2_POINT_SIZE: usize = 96;
/// Size of a serialized scalar.
pub const SCALAR_SIZE: usize = 32;

/// Errors raised while parsing wire types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Hash must contain at least {expected} bytes, got {got}")]
    InvalidHashLength { expected: usize, got: usize },
}

// =========================
// CURVE ENCODINGS
// =========================

/// Compressed G1 point on BLS12-381 (48 bytes). Public keys and public-key shares.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct G1Point(#[serde_as(as = "[_; 48]")] pub [u8; G1_POINT_SIZE]);

impl Default for G1Point {
    fn default() -> Self {
        Self([0u8; G1_POINT_SIZE])
    }
}

/// Compressed G2 point on BLS12-381 (96 bytes). Signatures and signature shares.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct G2Point(#[serde_as(as = "[_; 96]")] pub [u8; G2_POINT_SIZE]);

impl Default for G2Point {
    fn default() -> Self {
        Self([0u8; G2_POINT_SIZE])
    }
}

/// Scalar field element (32 bytes, big-endian). Private keys and private-key shares.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Scalar(#[serde_as(as = "[_; 32]")] pub [u8; SCALAR_SIZE]);

impl Default for Scalar {
    fn default() -> Self {
        Self([0u8; SCALAR_SIZE])
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl AsRef<[u8]> for G1Point {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for G2Point {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Scalar {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g1_point_borsh() {
        let point = G1Point([42u8; 48]);
        let encoded = borsh::to_vec(&point).unwrap();
        assert_eq!(encoded.len(), G1_POINT_SIZE);
        let decoded: G1Point = borsh::from_slice(&encoded).unwrap();
        assert_eq!(point, decoded);
    }

    #[test]
    fn test_g2_point_json() {
        let mut bytes = [0u8; 96];
        bytes[0] = 0xc0;
        bytes[95] = 7;
        let point = G2Point(bytes);
        let json = serde_json::to_string(&point).unwrap();
        let decoded: G2Point = serde_json::from_str(&json).unwrap();
        assert_eq!(point, decoded);
    }

    #[test]
    fn test_scalar_default_is_zero() {
        assert_eq!(Scalar::default().0, [0u8; 32]);
        assert_eq!(Scalar::default().as_ref().len(), SCALAR_SIZE);
    }

    #[test]
    fn test_scalar_zeroize() {
        let mut scalar = Scalar([9u8; 32]);
        scalar.zeroize();
        assert_eq!(scalar, Scalar::default());
    }
}
