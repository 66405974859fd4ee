//! Share derivation.
//!
//! The base values are the coefficients of a polynomial, constant term first.
//! A party's share is that polynomial evaluated at the hash of its identifier:
//!
//! share(id) = base[0] + base[1]·x + ... + base[m-1]·x^(m-1),  x = H(id)
//!
//! With m base values any m shares recover `base[0]`. Deriving from the public
//! keys or signatures of the base private keys gives the public key or
//! signature of the private-key share.

use bls12_381::Scalar;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::Result;
use crate::keys::{PrivateKey, PublicKey, Signature};
use crate::poly;
use crate::scheme::ThresholdScheme;

impl ThresholdScheme {
    /// Derive the private-key share for `id` from the base private keys.
    pub fn private_key_share<I>(&self, base_keys: &[PrivateKey], id: &I) -> Result<PrivateKey>
    where
        I: AsRef<[u8]> + ?Sized,
    {
        let x = self.evaluation_point(id.as_ref())?;

        let coefficients: Zeroizing<Vec<Scalar>> =
            Zeroizing::new(base_keys.iter().map(|sk| *sk.scalar()).collect());
        let share = poly::evaluate(&coefficients[..], &x)?;

        debug!(coefficients = base_keys.len(), "derived private key share");
        Ok(PrivateKey::from_scalar(share))
    }

    /// Derive the public-key share for `id` from the base public keys.
    pub fn public_key_share<I>(&self, base_public_keys: &[PublicKey], id: &I) -> Result<PublicKey>
    where
        I: AsRef<[u8]> + ?Sized,
    {
        let x = self.evaluation_point(id.as_ref())?;

        let coefficients: Vec<_> = base_public_keys.iter().map(|pk| *pk.point()).collect();
        let share = poly::evaluate(&coefficients, &x)?;

        debug!(coefficients = base_public_keys.len(), "derived public key share");
        Ok(PublicKey(share))
    }

    /// Derive the signature share for `id` from signatures made with the base keys.
    pub fn signature_share<I>(&self, base_signatures: &[Signature], id: &I) -> Result<Signature>
    where
        I: AsRef<[u8]> + ?Sized,
    {
        let x = self.evaluation_point(id.as_ref())?;

        let coefficients: Vec<_> = base_signatures.iter().map(|sig| *sig.point()).collect();
        let share = poly::evaluate(&coefficients, &x)?;

        debug!(coefficients = base_signatures.len(), "derived signature share");
        Ok(Signature(share))
    }

    /// Check a private-key share against the published base public keys.
    ///
    /// Holders can validate what a dealer handed them without seeing the base
    /// private keys: `share·G` must equal the public-key share for `id`.
    pub fn verify_private_key_share<I>(
        &self,
        share: &PrivateKey,
        base_public_keys: &[PublicKey],
        id: &I,
    ) -> bool
    where
        I: AsRef<[u8]> + ?Sized,
    {
        match self.public_key_share(base_public_keys, id) {
            Ok(expected) => share.public_key() == expected,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThresholdError;
    use crate::hash::hash_to_scalar;
    use crate::config::DEFAULT_IDENTIFIER_DST;
    use rand::rngs::OsRng;

    fn base_keys(m: usize) -> Vec<PrivateKey> {
        (0..m).map(|_| PrivateKey::random(&mut OsRng)).collect()
    }

    #[test]
    fn test_private_key_share_evaluates_polynomial() {
        let scheme = ThresholdScheme::default();
        let keys: Vec<PrivateKey> = [5u64, 3, 2]
            .iter()
            .map(|c| PrivateKey::from_scalar(Scalar::from(*c)))
            .collect();

        let share = scheme.private_key_share(&keys, b"member-1").unwrap();
        let x = hash_to_scalar(b"member-1", DEFAULT_IDENTIFIER_DST);
        let expected = Scalar::from(5u64) + Scalar::from(3u64) * x + Scalar::from(2u64) * x * x;
        assert_eq!(*share.scalar(), expected);
    }

    #[test]
    fn test_single_base_key_share_is_the_key() {
        let scheme = ThresholdScheme::default();
        let sk = PrivateKey::random(&mut OsRng);
        let share = scheme.private_key_share(std::slice::from_ref(&sk), b"any").unwrap();
        assert_eq!(share, sk);
    }

    #[test]
    fn test_shares_are_consistent_across_domains() {
        let scheme = ThresholdScheme::default();
        let keys = base_keys(3);
        let pubs: Vec<PublicKey> = keys.iter().map(PrivateKey::public_key).collect();

        for id in ["alice", "bob", "carol"] {
            let sk_share = scheme.private_key_share(&keys, id).unwrap();
            let pk_share = scheme.public_key_share(&pubs, id).unwrap();
            assert_eq!(sk_share.public_key(), pk_share);
            assert!(scheme.verify_private_key_share(&sk_share, &pubs, id));
        }
    }

    #[test]
    fn test_signature_share_matches_signing_with_key_share() {
        let scheme = ThresholdScheme::default();
        let keys = base_keys(3);
        let msg = b"quorum message";
        let sigs: Vec<Signature> = keys.iter().map(|sk| scheme.sign(sk, msg)).collect();

        let sig_share = scheme.signature_share(&sigs, b"member-7").unwrap();
        let sk_share = scheme.private_key_share(&keys, b"member-7").unwrap();
        assert_eq!(sig_share, scheme.sign(&sk_share, msg));
    }

    #[test]
    fn test_verify_private_key_share_rejects_wrong_share() {
        let scheme = ThresholdScheme::default();
        let keys = base_keys(2);
        let pubs: Vec<PublicKey> = keys.iter().map(PrivateKey::public_key).collect();

        let share = scheme.private_key_share(&keys, b"member-1").unwrap();
        assert!(!scheme.verify_private_key_share(&share, &pubs, b"member-2"));
        assert!(!scheme.verify_private_key_share(&share, &[], b"member-1"));
    }

    #[test]
    fn test_share_derivation_is_deterministic() {
        let scheme = ThresholdScheme::default();
        let keys = base_keys(3);
        let a = scheme.private_key_share(&keys, b"member-1").unwrap();
        let b = scheme.private_key_share(&keys, b"member-1").unwrap();
        let c = scheme.private_key_share(&keys, b"member-2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_base_lists_rejected() {
        let scheme = ThresholdScheme::default();
        assert!(matches!(
            scheme.private_key_share(&[], b"id"),
            Err(ThresholdError::InvalidInput(_))
        ));
        assert!(matches!(
            scheme.public_key_share(&[], b"id"),
            Err(ThresholdError::InvalidInput(_))
        ));
        assert!(matches!(
            scheme.signature_share(&[], b"id"),
            Err(ThresholdError::InvalidInput(_))
        ));
    }
}
