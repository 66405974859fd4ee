//! Scheme configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThresholdError};

/// Ciphersuite tag for basic-scheme BLS signatures in G2 (RFC 9380 / IETF BLS draft).
pub const DEFAULT_SIGNATURE_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Ciphersuite tag for message-augmented BLS signatures in G2.
pub const AUGMENTED_SIGNATURE_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_AUG_";

/// Domain separation tag used when hashing share identifiers to scalars.
pub const DEFAULT_IDENTIFIER_DST: &[u8] = b"TBLS_BLS12381_ID_TO_SCALAR_SHA512_";

/// Longest tag `expand_message_xmd` accepts without hashing the tag first.
pub const MAX_DST_LEN: usize = 255;

/// How a message is bound before it is hashed to G2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// The message is hashed as given. Aggregate verification requires
    /// distinct messages. Threshold signing uses this scheme.
    #[default]
    Basic,
    /// The message is prefixed with the signer's compressed public key, so
    /// aggregates over repeated messages are safe. Signature shares made in
    /// this mode are bound to each share's own public key and do not
    /// recover into a quorum signature.
    Augmented,
}

/// Domain separation for a threshold scheme instance.
///
/// Every party deriving shares and every party recovering from them must use
/// the same configuration, otherwise identifiers hash to different points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Message binding for sign/verify
    pub scheme: SchemeKind,
    /// Tag for hashing messages to G2
    pub signature_dst: Vec<u8>,
    /// Tag for hashing identifiers to the scalar field
    pub identifier_dst: Vec<u8>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::Basic,
            signature_dst: DEFAULT_SIGNATURE_DST.to_vec(),
            identifier_dst: DEFAULT_IDENTIFIER_DST.to_vec(),
        }
    }
}

impl ThresholdConfig {
    pub fn new(signature_dst: impl Into<Vec<u8>>, identifier_dst: impl Into<Vec<u8>>) -> Result<Self> {
        let config = Self {
            scheme: SchemeKind::Basic,
            signature_dst: signature_dst.into(),
            identifier_dst: identifier_dst.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// The message-augmented ciphersuite with the default identifier tag.
    pub fn augmented() -> Self {
        Self {
            scheme: SchemeKind::Augmented,
            signature_dst: AUGMENTED_SIGNATURE_DST.to_vec(),
            identifier_dst: DEFAULT_IDENTIFIER_DST.to_vec(),
        }
    }

    /// Check tag lengths. Configurations deserialized from external sources
    /// should be validated before use.
    pub fn validate(&self) -> Result<()> {
        if self.signature_dst.is_empty() || self.signature_dst.len() > MAX_DST_LEN {
            return Err(ThresholdError::InvalidConfig(
                "signature DST must be 1..=255 bytes",
            ));
        }
        if self.identifier_dst.is_empty() || self.identifier_dst.len() > MAX_DST_LEN {
            return Err(ThresholdError::InvalidConfig(
                "identifier DST must be 1..=255 bytes",
            ));
        }
        Ok(())
    }
}
