//! Child key derivation.
//!
//! Hardened derivation follows EIP-2333. The parent key seeds two Lamport key
//! sets (from the key and from its bitwise complement), the hashed Lamport
//! public halves are compressed to 32 bytes, and that digest goes through the
//! same `HKDF_mod_r` as [`PrivateKey::key_gen`]. Only the holder of the
//! private key can derive hardened children.
//!
//! Unhardened derivation adds `SHA-256(pk || index) mod r` to the key, so the
//! matching child public key can be computed from the parent public key alone.

use bls12_381::G1Projective;
use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{Result, ThresholdError};
use crate::keys::{hkdf_mod_r, scalar_from_be_wide, PrivateKey, PublicKey};

const LAMPORT_CHUNKS: usize = 255;
const LAMPORT_CHUNK_SIZE: usize = 32;

impl PrivateKey {
    /// Hardened (EIP-2333) child key at `index`.
    pub fn derive_child_private_key(&self, index: u32) -> Result<PrivateKey> {
        let compressed_lamport_pk = self.to_lamport_pk(index)?;
        hkdf_mod_r(&compressed_lamport_pk).map(PrivateKey::from_scalar)
    }

    /// Unhardened child key at `index`. Its public key equals
    /// [`PublicKey::derive_child_public_key_unhardened`] on the parent public key.
    pub fn derive_child_private_key_unhardened(&self, index: u32) -> PrivateKey {
        let tweak = unhardened_tweak(&self.public_key(), index);
        PrivateKey::from_scalar(self.scalar() + tweak)
    }

    fn to_lamport_pk(&self, index: u32) -> Result<[u8; 32]> {
        let salt = index.to_be_bytes();
        let ikm = self.to_bytes();
        let mut not_ikm = Zeroizing::new([0u8; 32]);
        for (dst, src) in not_ikm.iter_mut().zip(ikm.iter()) {
            *dst = !*src;
        }

        let lamport_0 = ikm_to_lamport_sk(&ikm[..], &salt)?;
        let lamport_1 = ikm_to_lamport_sk(&not_ikm[..], &salt)?;

        let mut hasher = Sha256::new();
        for chunk in lamport_0
            .chunks_exact(LAMPORT_CHUNK_SIZE)
            .chain(lamport_1.chunks_exact(LAMPORT_CHUNK_SIZE))
        {
            hasher.update(Sha256::digest(chunk));
        }

        let mut compressed = [0u8; 32];
        compressed.copy_from_slice(&hasher.finalize());
        Ok(compressed)
    }
}

impl PublicKey {
    /// Unhardened child public key at `index`.
    pub fn derive_child_public_key_unhardened(&self, index: u32) -> PublicKey {
        let tweak = unhardened_tweak(self, index);
        PublicKey(self.point() + G1Projective::generator() * tweak)
    }
}

/// 255 Lamport secret chunks of 32 bytes, from one HKDF-SHA256 extract/expand.
fn ikm_to_lamport_sk(ikm: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = Zeroizing::new(vec![0u8; LAMPORT_CHUNKS * LAMPORT_CHUNK_SIZE]);
    hk.expand(&[], &mut okm[..])
        .map_err(|_| ThresholdError::InvalidInput("HKDF output length"))?;
    Ok(okm)
}

fn unhardened_tweak(parent: &PublicKey, index: u32) -> bls12_381::Scalar {
    let mut hasher = Sha256::new();
    hasher.update(parent.to_bytes());
    hasher.update(index.to_be_bytes());
    scalar_from_be_wide(&hasher.finalize())
}
