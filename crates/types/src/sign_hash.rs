//! Quorum sign hashes.
//!
//! An LLMQ quorum does not sign raw messages. Members sign
//! `SHA256d(llmq_type || quorum_hash || sign_id || msg_hash)` with their key
//! shares, and any threshold subset of those signature shares recovers the
//! quorum signature over the same hash.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::TypesError;

/// Size of a quorum, sign-id or message hash.
pub const HASH_SIZE: usize = 32;

/// A 32-byte hash in internal (little-endian) byte order.
///
/// `Display` and [`Hash::from_hex_reversed`] use the byte-reversed form that
/// block explorers and RPC interfaces show.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Hash(pub [u8; HASH_SIZE]);

impl Hash {
    /// Parse a displayed (byte-reversed) hex hash.
    ///
    /// Longer inputs are accepted; only the trailing 32 bytes are used.
    pub fn from_hex_reversed(hex_str: &str) -> Result<Self, TypesError> {
        let data = hex::decode(hex_str).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        if data.len() < HASH_SIZE {
            return Err(TypesError::InvalidHashLength {
                expected: HASH_SIZE,
                got: data.len(),
            });
        }

        let mut hash = [0u8; HASH_SIZE];
        for (i, byte) in data[data.len() - HASH_SIZE..].iter().enumerate() {
            hash[HASH_SIZE - (i + 1)] = *byte;
        }
        Ok(Self(hash))
    }

    /// Hex in displayed (byte-reversed) order.
    pub fn to_hex_reversed(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_reversed())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex_reversed())
    }
}

/// Build the hash a quorum signs for a request.
pub fn build_sign_hash(llmq_type: u8, quorum_hash: &Hash, sign_id: &Hash, msg_hash: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([llmq_type]);
    hasher.update(quorum_hash.0);
    hasher.update(sign_id.0);
    hasher.update(msg_hash.0);
    let first = hasher.finalize();
    Hash(Sha256::digest(first).into())
}
