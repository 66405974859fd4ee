//! BLS signing and verification (signatures in G2).
//!
//! sign(sk, m) = sk · H(m)
//! verify(pk, m, σ): e(G1, σ) == e(pk, H(m))
//!
//! In the augmented scheme `m` is replaced by `pk || m`.
//!
//! Shares and full keys go through the same code; a signature made with a
//! private-key share verifies against the matching public-key share.

use bls12_381::{multi_miller_loop, G1Affine, G2Prepared, Gt};
use group::Curve;

use crate::config::SchemeKind;
use crate::keys::{PrivateKey, PublicKey, Signature};
use crate::scheme::ThresholdScheme;

impl ThresholdScheme {
    pub fn sign(&self, sk: &PrivateKey, message: &[u8]) -> Signature {
        let hashed = match self.config().scheme {
            SchemeKind::Basic => self.hash_message(message),
            SchemeKind::Augmented => self.hash_signed_message(&sk.public_key(), message),
        };
        Signature(hashed * sk.scalar())
    }

    /// Check `sig` on `message` under `pk`.
    ///
    /// Identity keys and signatures never verify.
    pub fn verify(&self, pk: &PublicKey, message: &[u8], sig: &Signature) -> bool {
        if pk.is_identity() || sig.is_identity() {
            return false;
        }

        let neg_g1 = -G1Affine::generator();
        let pk_affine = pk.point().to_affine();
        let sig_prepared = G2Prepared::from(sig.point().to_affine());
        let hash_prepared = G2Prepared::from(self.hash_signed_message(pk, message).to_affine());

        // e(-G1, σ) · e(pk, H(m)) == 1
        let result = multi_miller_loop(&[(&neg_g1, &sig_prepared), (&pk_affine, &hash_prepared)])
            .final_exponentiation();
        result == Gt::identity()
    }

    /// [`verify`](Self::verify) over compressed encodings. Malformed input
    /// fails verification instead of erroring.
    pub fn verify_bytes(&self, pk_bytes: &[u8], message: &[u8], sig_bytes: &[u8]) -> bool {
        let Ok(pk) = PublicKey::from_bytes(pk_bytes) else {
            return false;
        };
        let Ok(sig) = Signature::from_bytes(sig_bytes) else {
            return false;
        };
        self.verify(&pk, message, &sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdConfig;
    use bls12_381::G2Projective;
    use rand::rngs::OsRng;

    #[test]
    fn test_sign_verify() {
        let scheme = ThresholdScheme::default();
        let sk = PrivateKey::random(&mut OsRng);
        let pk = sk.public_key();

        let sig = scheme.sign(&sk, b"hello");
        assert!(scheme.verify(&pk, b"hello", &sig));
        assert!(!scheme.verify(&pk, b"goodbye", &sig));

        let other = PrivateKey::random(&mut OsRng).public_key();
        assert!(!scheme.verify(&other, b"hello", &sig));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let scheme = ThresholdScheme::default();
        let sk = PrivateKey::random(&mut OsRng);
        assert_eq!(scheme.sign(&sk, b"m"), scheme.sign(&sk, b"m"));
    }

    #[test]
    fn test_empty_message() {
        let scheme = ThresholdScheme::default();
        let sk = PrivateKey::random(&mut OsRng);
        let sig = scheme.sign(&sk, b"");
        assert!(scheme.verify(&sk.public_key(), b"", &sig));
    }

    #[test]
    fn test_identity_never_verifies() {
        let scheme = ThresholdScheme::default();
        let sk = PrivateKey::random(&mut OsRng);
        let sig = scheme.sign(&sk, b"m");

        let identity_pk = PublicKey(bls12_381::G1Projective::identity());
        let identity_sig = Signature(G2Projective::identity());
        assert!(!scheme.verify(&identity_pk, b"m", &sig));
        assert!(!scheme.verify(&sk.public_key(), b"m", &identity_sig));
        assert!(!scheme.verify(&identity_pk, b"m", &identity_sig));
    }

    #[test]
    fn test_signature_dst_separates_schemes() {
        let default = ThresholdScheme::default();
        let custom = ThresholdScheme::new(
            ThresholdConfig::new(b"CUSTOM_SIG_DST_".to_vec(), b"id".to_vec()).unwrap(),
        )
        .unwrap();
        let sk = PrivateKey::random(&mut OsRng);

        let sig = custom.sign(&sk, b"m");
        assert!(custom.verify(&sk.public_key(), b"m", &sig));
        assert!(!default.verify(&sk.public_key(), b"m", &sig));
    }

    #[test]
    fn test_verify_bytes() {
        let scheme = ThresholdScheme::default();
        let sk = PrivateKey::random(&mut OsRng);
        let pk_bytes = sk.public_key().to_bytes();
        let sig_bytes = scheme.sign(&sk, b"m").to_bytes();

        assert!(scheme.verify_bytes(&pk_bytes, b"m", &sig_bytes));
        assert!(!scheme.verify_bytes(&pk_bytes, b"x", &sig_bytes));
        assert!(!scheme.verify_bytes(&pk_bytes[..47], b"m", &sig_bytes));
        assert!(!scheme.verify_bytes(&pk_bytes, b"m", &[0u8; 96]));
        assert!(!scheme.verify_bytes(&[0xffu8; 48], b"m", &sig_bytes));
    }

    #[test]
    fn test_augmented_sign_verify() {
        let augmented = ThresholdScheme::new(ThresholdConfig::augmented()).unwrap();
        let sk = PrivateKey::key_gen(b"seedweedseedweedseedweedseedweed").unwrap();
        let pk = sk.public_key();

        let sig = augmented.sign(&sk, b"ayya");
        assert!(augmented.verify(&pk, b"ayya", &sig));
        assert!(!augmented.verify(&pk, b"ayyb", &sig));

        let other = PrivateKey::random(&mut OsRng).public_key();
        assert!(!augmented.verify(&other, b"ayya", &sig));
    }

    #[test]
    fn test_augmented_signs_public_key_and_message() {
        let augmented = ThresholdScheme::new(ThresholdConfig::augmented()).unwrap();
        let basic_aug_tag = ThresholdScheme::new(
            ThresholdConfig::new(crate::config::AUGMENTED_SIGNATURE_DST.to_vec(), b"id".to_vec())
                .unwrap(),
        )
        .unwrap();
        let sk = PrivateKey::random(&mut OsRng);

        let mut prefixed = sk.public_key().to_bytes().to_vec();
        prefixed.extend_from_slice(b"msg");
        assert_eq!(augmented.sign(&sk, b"msg"), basic_aug_tag.sign(&sk, &prefixed));
    }

    #[test]
    fn test_schemes_do_not_cross_verify() {
        let basic = ThresholdScheme::default();
        let augmented = ThresholdScheme::new(ThresholdConfig::augmented()).unwrap();
        let sk = PrivateKey::random(&mut OsRng);
        let pk = sk.public_key();

        assert!(!augmented.verify(&pk, b"m", &basic.sign(&sk, b"m")));
        assert!(!basic.verify(&pk, b"m", &augmented.sign(&sk, b"m")));
    }
}
