//! Private keys, public keys and signatures.
//!
//! A share has the same type as the value it was derived from: a private-key
//! share is a [`PrivateKey`], a public-key share is a [`PublicKey`], a
//! signature share is a [`Signature`]. Nothing in the type records whether a
//! value came out of polynomial evaluation.
//!
//! # Encodings
//! - Private keys: 32-byte big-endian scalar.
//! - Public keys: 48-byte compressed G1 point.
//! - Signatures: 96-byte compressed G2 point.

use std::fmt;

use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Curve;
use hkdf::Hkdf;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use tbls_types::{G1Point, G2Point, Scalar as TypesScalar, G1_POINT_SIZE, G2_POINT_SIZE, SCALAR_SIZE};

use crate::error::{Result, ThresholdError};

pub const PRIVATE_KEY_SIZE: usize = SCALAR_SIZE;
pub const PUBLIC_KEY_SIZE: usize = G1_POINT_SIZE;
pub const SIGNATURE_SIZE: usize = G2_POINT_SIZE;

/// Shortest seed accepted by [`PrivateKey::key_gen`].
pub const MIN_SEED_LEN: usize = 32;

const KEYGEN_SALT: &[u8] = b"BLS-SIG-KEYGEN-SALT-";
// I2OSP(L, 2) with L = 48 and an empty key_info.
const KEYGEN_INFO: [u8; 2] = [0x00, 0x30];

// =========================
// PRIVATE KEY
// =========================

/// A BLS private key or private-key share.
///
/// Move-only apart from an explicit `clone`; the scalar is wiped when the
/// value is dropped. Equality is constant-time.
#[derive(Clone)]
pub struct PrivateKey(pub(crate) Scalar);

impl PrivateKey {
    pub(crate) fn from_scalar(scalar: Scalar) -> Self {
        Self(scalar)
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }

    /// Sample a uniformly random non-zero key.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let scalar = Scalar::random(&mut *rng);
            if !bool::from(scalar.is_zero()) {
                return Self(scalar);
            }
        }
    }

    /// Derive a key from seed material with the IETF BLS `KeyGen` procedure
    /// (HKDF-SHA256, L = 48, empty `key_info`).
    pub fn key_gen(seed: &[u8]) -> Result<Self> {
        if seed.len() < MIN_SEED_LEN {
            return Err(ThresholdError::SeedTooShort {
                min: MIN_SEED_LEN,
                got: seed.len(),
            });
        }

        hkdf_mod_r(seed).map(Self)
    }

    /// Decode a 32-byte big-endian key.
    ///
    /// With `mod_order` set, encodings at or above the group order are reduced
    /// instead of rejected. A zero key is rejected either way.
    pub fn from_bytes(bytes: &[u8], mod_order: bool) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(ThresholdError::InvalidLength {
                expected: PRIVATE_KEY_SIZE,
                got: bytes.len(),
            });
        }

        let scalar = if mod_order {
            scalar_from_be_wide(bytes)
        } else {
            let mut le = Zeroizing::new([0u8; 32]);
            for (dst, src) in le.iter_mut().zip(bytes.iter().rev()) {
                *dst = *src;
            }
            Option::<Scalar>::from(Scalar::from_bytes(&le)).ok_or(ThresholdError::InvalidScalar)?
        };

        if bool::from(scalar.is_zero()) {
            return Err(ThresholdError::ZeroPrivateKey);
        }
        Ok(Self(scalar))
    }

    /// Big-endian encoding, wiped when the returned buffer is dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut bytes = Zeroizing::new(self.0.to_bytes());
        bytes.reverse();
        bytes
    }

    /// The matching public key, `sk · G1`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(G1Projective::generator() * self.0)
    }

    pub fn is_zero(&self) -> bool {
        bool::from(self.0.is_zero())
    }

    /// Wire form of the key. The returned container is wiped on drop; copies
    /// made from it (e.g. serialized buffers) are the caller's to clean up.
    pub fn to_wire(&self) -> Zeroizing<TypesScalar> {
        Zeroizing::new(TypesScalar(*self.to_bytes()))
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for PrivateKey {}

impl TryFrom<&TypesScalar> for PrivateKey {
    type Error = ThresholdError;

    fn try_from(value: &TypesScalar) -> Result<Self> {
        Self::from_bytes(&value.0, false)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"***SENSITIVE***").finish()
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

/// `HKDF_mod_r`: HKDF-SHA256 with a re-hashed salt until the output reduces
/// to a non-zero scalar. Shared by `key_gen` and hardened child derivation.
pub(crate) fn hkdf_mod_r(ikm: &[u8]) -> Result<Scalar> {
    let mut ikm_padded = Zeroizing::new(Vec::with_capacity(ikm.len() + 1));
    ikm_padded.extend_from_slice(ikm);
    ikm_padded.push(0);

    let mut salt = Sha256::digest(KEYGEN_SALT);
    loop {
        let hk = Hkdf::<Sha256>::new(Some(salt.as_slice()), &ikm_padded);
        let mut okm = Zeroizing::new([0u8; 48]);
        hk.expand(&KEYGEN_INFO, &mut okm[..])
            .map_err(|_| ThresholdError::InvalidInput("HKDF output length"))?;

        let scalar = scalar_from_be_wide(&okm[..]);
        if !bool::from(scalar.is_zero()) {
            return Ok(scalar);
        }
        salt = Sha256::digest(salt);
    }
}

/// OS2IP of a big-endian byte string of at most 64 bytes, reduced modulo r.
pub(crate) fn scalar_from_be_wide(bytes: &[u8]) -> Scalar {
    debug_assert!(bytes.len() <= 64);
    let mut wide = Zeroizing::new([0u8; 64]);
    for (dst, src) in wide.iter_mut().zip(bytes.iter().rev()) {
        *dst = *src;
    }
    Scalar::from_bytes_wide(&wide)
}

// =========================
// PUBLIC KEY
// =========================

/// A BLS public key or public-key share (G1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(pub(crate) G1Projective);

impl PublicKey {
    pub(crate) fn point(&self) -> &G1Projective {
        &self.0
    }

    /// The G1 generator, i.e. the public key of the scalar one.
    pub fn generator() -> Self {
        Self(G1Projective::generator())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| ThresholdError::InvalidLength {
                expected: PUBLIC_KEY_SIZE,
                got: bytes.len(),
            })?;
        let point = Option::<G1Affine>::from(G1Affine::from_compressed(bytes))
            .ok_or(ThresholdError::InvalidG1Point)?;
        Ok(Self(point.into()))
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.to_affine().to_compressed()
    }

    /// First four bytes of SHA-256 over the compressed encoding, big-endian.
    pub fn fingerprint(&self) -> u32 {
        let digest = Sha256::digest(self.to_bytes());
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

impl From<&PublicKey> for G1Point {
    fn from(value: &PublicKey) -> Self {
        G1Point(value.to_bytes())
    }
}

impl TryFrom<&G1Point> for PublicKey {
    type Error = ThresholdError;

    fn try_from(value: &G1Point) -> Result<Self> {
        Self::from_bytes(&value.0)
    }
}

// =========================
// SIGNATURE
// =========================

/// A BLS signature or signature share (G2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub(crate) G2Projective);

impl Signature {
    pub(crate) fn point(&self) -> &G2Projective {
        &self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; SIGNATURE_SIZE] =
            bytes.try_into().map_err(|_| ThresholdError::InvalidLength {
                expected: SIGNATURE_SIZE,
                got: bytes.len(),
            })?;
        let point = Option::<G2Affine>::from(G2Affine::from_compressed(bytes))
            .ok_or(ThresholdError::InvalidG2Point)?;
        Ok(Self(point.into()))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.0.to_affine().to_compressed()
    }

    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

impl From<&Signature> for G2Point {
    fn from(value: &Signature) -> Self {
        G2Point(value.to_bytes())
    }
}

impl TryFrom<&G2Point> for Signature {
    type Error = ThresholdError;

    fn try_from(value: &G2Point) -> Result<Self> {
        Self::from_bytes(&value.0)
    }
}
