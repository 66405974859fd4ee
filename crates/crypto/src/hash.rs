//! Hashing adapters onto the scalar field and G2.

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{G2Projective, Scalar};
use sha2::{Digest, Sha512};

use crate::config::MAX_DST_LEN;

/// Hash arbitrary bytes (including the empty string) to a scalar.
///
/// SHA-512 over `len(dst) || dst || data`, reduced modulo r. The 512-bit
/// input keeps the reduction bias negligible.
///
/// `dst` must fit the one-byte length prefix; [`ThresholdConfig::validate`]
/// enforces that for every tag that reaches here.
///
/// [`ThresholdConfig::validate`]: crate::config::ThresholdConfig::validate
pub(crate) fn hash_to_scalar(data: &[u8], dst: &[u8]) -> Scalar {
    debug_assert!(dst.len() <= MAX_DST_LEN);

    let mut hasher = Sha512::new();
    hasher.update([dst.len() as u8]);
    hasher.update(dst);
    hasher.update(data);
    let digest = hasher.finalize();

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&digest);
    Scalar::from_bytes_wide(&wide)
}

/// Hash a message to G2 with RFC 9380 `expand_message_xmd` over SHA-256.
pub fn hash_to_g2(message: &[u8], dst: &[u8]) -> G2Projective {
    <G2Projective as HashToCurve<ExpandMsgXmd<sha2_09::Sha256>>>::hash_to_curve(message, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_IDENTIFIER_DST, DEFAULT_SIGNATURE_DST};
    use ff::Field;

    #[test]
    fn test_hash_to_scalar_deterministic() {
        let a = hash_to_scalar(b"member-1", DEFAULT_IDENTIFIER_DST);
        let b = hash_to_scalar(b"member-1", DEFAULT_IDENTIFIER_DST);
        let c = hash_to_scalar(b"member-2", DEFAULT_IDENTIFIER_DST);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Scalar::ZERO);
    }

    #[test]
    fn test_hash_to_scalar_accepts_empty_input() {
        let empty = hash_to_scalar(b"", DEFAULT_IDENTIFIER_DST);
        assert_ne!(empty, Scalar::ZERO);
    }

    #[test]
    fn test_hash_to_scalar_separates_domains() {
        let a = hash_to_scalar(b"member-1", b"domain-a");
        let b = hash_to_scalar(b"member-1", b"domain-b");
        assert_ne!(a, b);

        // The length prefix keeps tag/data boundaries unambiguous.
        let c = hash_to_scalar(b"bc", b"a");
        let d = hash_to_scalar(b"c", b"ab");
        assert_ne!(c, d);
    }

    #[test]
    fn test_hash_to_scalar_longest_tag() {
        let tag = [0x42u8; MAX_DST_LEN];
        let mut other = tag;
        other[MAX_DST_LEN - 1] = 0x43;

        let a = hash_to_scalar(b"member-1", &tag);
        assert_ne!(a, hash_to_scalar(b"member-1", &other));
        assert_ne!(a, hash_to_scalar(b"member-1", &tag[..MAX_DST_LEN - 1]));

        // Anything longer never reaches the hash.
        let too_long = vec![0x42; MAX_DST_LEN + 1];
        assert!(crate::config::ThresholdConfig::new(b"sig".to_vec(), too_long).is_err());
    }

    #[test]
    fn test_hash_to_g2() {
        let p1 = hash_to_g2(b"message 1", DEFAULT_SIGNATURE_DST);
        let p2 = hash_to_g2(b"message 2", DEFAULT_SIGNATURE_DST);
        let p3 = hash_to_g2(b"message 1", DEFAULT_SIGNATURE_DST);

        assert_ne!(p1, p2);
        assert_eq!(p1, p3);
        assert!(!bool::from(p1.is_identity()));
    }
}
