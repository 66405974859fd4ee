//! Recovery from a quorum of shares.
//!
//! Given shares and the identifiers they were derived for, Lagrange
//! interpolation at zero yields the constant term of the sharing polynomial:
//!
//! value = Σ λ_i · share_i,  λ_i = Π_{j≠i} x_j / (x_j - x_i)
//!
//! The same λ_i are used for private keys, public keys and signatures, so
//! recovering a public key from public-key shares matches lifting the
//! recovered private key to G1. Fewer shares than the threshold produce a
//! well-defined but unrelated value; that is not detected.

use bls12_381::Scalar;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Result, ThresholdError};
use crate::keys::{PrivateKey, PublicKey, Signature};
use crate::poly;
use crate::scheme::ThresholdScheme;

fn check_quorum(shares: usize, ids: usize) -> Result<()> {
    if shares == 0 {
        return Err(ThresholdError::InvalidInput("no shares to recover from"));
    }
    if shares != ids {
        return Err(ThresholdError::InvalidInput(
            "shares and identifiers differ in length",
        ));
    }
    Ok(())
}

impl ThresholdScheme {
    /// Recover the base private key from private-key shares.
    ///
    /// # Arguments
    /// * `shares` - Private-key shares, one per identifier
    /// * `ids` - The identifiers the shares were derived for, same order
    pub fn private_key_recover<I: AsRef<[u8]>>(
        &self,
        shares: &[PrivateKey],
        ids: &[I],
    ) -> Result<PrivateKey> {
        check_quorum(shares.len(), ids.len())?;
        let points = self.evaluation_points(ids)?;

        let values: Zeroizing<Vec<Scalar>> =
            Zeroizing::new(shares.iter().map(|sk| *sk.scalar()).collect());
        let recovered = poly::interpolate_at_zero(&points, &values[..])?;

        debug!(shares = shares.len(), "recovered private key");
        Ok(PrivateKey::from_scalar(recovered))
    }

    /// Recover the base public key from public-key shares.
    pub fn public_key_recover<I: AsRef<[u8]>>(
        &self,
        shares: &[PublicKey],
        ids: &[I],
    ) -> Result<PublicKey> {
        check_quorum(shares.len(), ids.len())?;
        let points = self.evaluation_points(ids)?;

        let values: Vec<_> = shares.iter().map(|pk| *pk.point()).collect();
        let recovered = poly::interpolate_at_zero(&points, &values)?;

        debug!(shares = shares.len(), "recovered public key");
        Ok(PublicKey(recovered))
    }

    /// Recover the threshold signature from signature shares.
    pub fn signature_recover<I: AsRef<[u8]>>(
        &self,
        shares: &[Signature],
        ids: &[I],
    ) -> Result<Signature> {
        check_quorum(shares.len(), ids.len())?;
        let points = self.evaluation_points(ids)?;

        let values: Vec<_> = shares.iter().map(|sig| *sig.point()).collect();
        let recovered = poly::interpolate_at_zero(&points, &values)?;

        debug!(shares = shares.len(), "recovered signature");
        Ok(Signature(recovered))
    }
}
