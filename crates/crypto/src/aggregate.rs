//! Non-threshold BLS aggregation.
//!
//! Plain sums of public keys or signatures, plus aggregate verification. The
//! basic scheme is only sound when every message is distinct, so repeated
//! messages fail verification there. The augmented scheme binds each message
//! to its signer and accepts repeats.

use std::collections::HashSet;

use bls12_381::{multi_miller_loop, G1Affine, G2Prepared, Gt};
use group::Curve;

use crate::config::SchemeKind;
use crate::error::{Result, ThresholdError};
use crate::keys::{PublicKey, Signature};
use crate::scheme::ThresholdScheme;

/// Sum public keys. The result verifies signatures aggregated over one message.
pub fn aggregate_public_keys(public_keys: &[PublicKey]) -> Result<PublicKey> {
    let (first, rest) = public_keys
        .split_first()
        .ok_or(ThresholdError::InvalidInput("no public keys to aggregate"))?;
    Ok(PublicKey(
        rest.iter().fold(*first.point(), |acc, pk| acc + pk.point()),
    ))
}

pub fn aggregate_signatures(signatures: &[Signature]) -> Result<Signature> {
    let (first, rest) = signatures
        .split_first()
        .ok_or(ThresholdError::InvalidInput("no signatures to aggregate"))?;
    Ok(Signature(
        rest.iter().fold(*first.point(), |acc, sig| acc + sig.point()),
    ))
}

impl ThresholdScheme {
    /// Verify an aggregate signature over `(public_keys[i], messages[i])` pairs.
    ///
    /// e(G1, σ) == Π e(pk_i, H(m_i))
    pub fn aggregate_verify<M: AsRef<[u8]>>(
        &self,
        public_keys: &[PublicKey],
        messages: &[M],
        sig: &Signature,
    ) -> bool {
        if public_keys.is_empty() || public_keys.len() != messages.len() {
            return false;
        }
        if sig.is_identity() || public_keys.iter().any(PublicKey::is_identity) {
            return false;
        }

        if self.config().scheme == SchemeKind::Basic {
            let mut seen = HashSet::with_capacity(messages.len());
            for message in messages {
                if !seen.insert(message.as_ref()) {
                    return false;
                }
            }
        }

        let neg_g1 = -G1Affine::generator();
        let sig_prepared = G2Prepared::from(sig.point().to_affine());

        let pk_affines: Vec<G1Affine> = public_keys.iter().map(|pk| pk.point().to_affine()).collect();
        let hashes: Vec<G2Prepared> = public_keys
            .iter()
            .zip(messages)
            .map(|(pk, m)| G2Prepared::from(self.hash_signed_message(pk, m.as_ref()).to_affine()))
            .collect();

        let mut terms = Vec::with_capacity(public_keys.len() + 1);
        terms.push((&neg_g1, &sig_prepared));
        terms.extend(pk_affines.iter().zip(hashes.iter()));

        multi_miller_loop(&terms).final_exponentiation() == Gt::identity()
    }
}
