//! Threshold BLS signatures on BLS12-381.
//!
//! Private keys are scalars, public keys live in G1 and signatures in G2.
//!
//! # Overview
//!
//! A (m, n) threshold setup works as follows:
//!
//! 1. **Base keys**: A dealer picks m private keys. Key 0 is the shared key;
//!    keys 1..m-1 are random coefficients of the sharing polynomial.
//!
//! 2. **Shares**: Each of the n parties gets the polynomial evaluated at the
//!    hash of its identifier. Public-key shares and signature shares are
//!    derived the same way from the base public keys or base signatures.
//!
//! 3. **Signing**: Each party signs with its private-key share. A signature
//!    share verifies against the matching public-key share.
//!
//! 4. **Recovery**: Any m signature shares are combined with Lagrange
//!    interpolation into the signature of base key 0. Private keys and public
//!    keys are recovered with the same coefficients.
//!
//! All operations are methods on [`ThresholdScheme`]. The free functions at
//! the crate root use the default configuration.
//!
//! Outside the threshold flow, [`SchemeKind::Augmented`] binds each signature
//! to its signer's public key, and private keys support EIP-2333 hardened and
//! unhardened child derivation.

pub mod aggregate;
pub mod config;
pub mod derive;
pub mod error;
pub mod hash;
pub mod keys;
pub mod poly;
pub mod recover;
pub mod scheme;
pub mod share;
pub mod sign;

pub use aggregate::{aggregate_public_keys, aggregate_signatures};
pub use config::{
    SchemeKind, ThresholdConfig, AUGMENTED_SIGNATURE_DST, DEFAULT_IDENTIFIER_DST,
    DEFAULT_SIGNATURE_DST,
};
pub use error::{Result, ThresholdError};
pub use keys::{
    PrivateKey, PublicKey, Signature, MIN_SEED_LEN, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
    SIGNATURE_SIZE,
};
pub use scheme::ThresholdScheme;

// =========================
// DEFAULT-CONFIGURATION SHORTHANDS
// =========================

pub fn private_key_share<I>(base_keys: &[PrivateKey], id: &I) -> Result<PrivateKey>
where
    I: AsRef<[u8]> + ?Sized,
{
    ThresholdScheme::default().private_key_share(base_keys, id)
}

pub fn public_key_share<I>(base_public_keys: &[PublicKey], id: &I) -> Result<PublicKey>
where
    I: AsRef<[u8]> + ?Sized,
{
    ThresholdScheme::default().public_key_share(base_public_keys, id)
}

pub fn signature_share<I>(base_signatures: &[Signature], id: &I) -> Result<Signature>
where
    I: AsRef<[u8]> + ?Sized,
{
    ThresholdScheme::default().signature_share(base_signatures, id)
}

pub fn verify_private_key_share<I>(share: &PrivateKey, base_public_keys: &[PublicKey], id: &I) -> bool
where
    I: AsRef<[u8]> + ?Sized,
{
    ThresholdScheme::default().verify_private_key_share(share, base_public_keys, id)
}

pub fn private_key_recover<I: AsRef<[u8]>>(shares: &[PrivateKey], ids: &[I]) -> Result<PrivateKey> {
    ThresholdScheme::default().private_key_recover(shares, ids)
}

pub fn public_key_recover<I: AsRef<[u8]>>(shares: &[PublicKey], ids: &[I]) -> Result<PublicKey> {
    ThresholdScheme::default().public_key_recover(shares, ids)
}

pub fn signature_recover<I: AsRef<[u8]>>(shares: &[Signature], ids: &[I]) -> Result<Signature> {
    ThresholdScheme::default().signature_recover(shares, ids)
}

pub fn sign(sk: &PrivateKey, message: &[u8]) -> Signature {
    ThresholdScheme::default().sign(sk, message)
}

pub fn verify(pk: &PublicKey, message: &[u8], sig: &Signature) -> bool {
    ThresholdScheme::default().verify(pk, message, sig)
}

pub fn verify_bytes(pk_bytes: &[u8], message: &[u8], sig_bytes: &[u8]) -> bool {
    ThresholdScheme::default().verify_bytes(pk_bytes, message, sig_bytes)
}

pub fn aggregate_verify<M: AsRef<[u8]>>(
    public_keys: &[PublicKey],
    messages: &[M],
    sig: &Signature,
) -> bool {
    ThresholdScheme::default().aggregate_verify(public_keys, messages, sig)
}
