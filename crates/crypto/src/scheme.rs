//! The scheme facade.
//!
//! Every threshold, signing and aggregation operation is a method on
//! [`ThresholdScheme`], so derivation and recovery always hash identifiers
//! under the same tag. The methods live next to their algorithms in
//! `share.rs`, `recover.rs`, `sign.rs` and `aggregate.rs`.

use bls12_381::{G2Projective, Scalar};
use ff::Field;
use tracing::warn;

use crate::config::{SchemeKind, ThresholdConfig};
use crate::error::{Result, ThresholdError};
use crate::hash::{hash_to_g2, hash_to_scalar};
use crate::keys::{PublicKey, PUBLIC_KEY_SIZE};

/// A threshold BLS scheme instance. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThresholdScheme {
    config: ThresholdConfig,
}

impl ThresholdScheme {
    pub fn new(config: ThresholdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Hash an identifier to its evaluation point. Zero is rejected: evaluating
    /// there would hand out the constant term.
    pub(crate) fn evaluation_point(&self, id: &[u8]) -> Result<Scalar> {
        let x = hash_to_scalar(id, &self.config.identifier_dst);
        if bool::from(x.is_zero()) {
            warn!(id_len = id.len(), "identifier hashes to zero");
            return Err(ThresholdError::DegenerateInterpolation);
        }
        Ok(x)
    }

    pub(crate) fn evaluation_points<I: AsRef<[u8]>>(&self, ids: &[I]) -> Result<Vec<Scalar>> {
        ids.iter()
            .map(|id| self.evaluation_point(id.as_ref()))
            .collect()
    }

    pub(crate) fn hash_message(&self, message: &[u8]) -> G2Projective {
        hash_to_g2(message, &self.config.signature_dst)
    }

    /// The G2 point a signature by `pk` over `message` commits to.
    pub(crate) fn hash_signed_message(&self, pk: &PublicKey, message: &[u8]) -> G2Projective {
        match self.config.scheme {
            SchemeKind::Basic => self.hash_message(message),
            SchemeKind::Augmented => {
                let mut augmented = Vec::with_capacity(PUBLIC_KEY_SIZE + message.len());
                augmented.extend_from_slice(&pk.to_bytes());
                augmented.extend_from_slice(message);
                self.hash_message(&augmented)
            }
        }
    }
}
