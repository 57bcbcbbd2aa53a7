//! Identities and content hashing.
//!
//! A voter identity is the BLAKE3 hash of the voter's ed25519 verifying key.
//! The caller hands out keys; the ballot only ever sees the derived ids.

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte BLAKE3 hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash (used as a sentinel).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Hash arbitrary bytes.
    pub fn of(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Hash a serializable value using CBOR.
    pub fn of_value<T: Serialize>(value: &T) -> Self {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf).expect("serialization should not fail");
        Self::of(&buf)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for byte in &self.0 {
            s.push_str(&format!("{:02x}", byte));
        }
        s
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A voter (or administrator) identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoterId(Hash);

impl VoterId {
    /// Derive the identity for a verifying key.
    pub fn from_key(key: &VerifyingKey) -> Self {
        Self(Hash::of(key.as_bytes()))
    }

    /// Wrap a precomputed hash. For callers that manage identity derivation
    /// themselves; `from_key` is the normal path.
    pub fn from_hash(hash: Hash) -> Self {
        Self(hash)
    }

    /// The underlying hash.
    pub fn as_hash(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Debug for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoterId({})", &self.0.to_hex()[..16])
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
