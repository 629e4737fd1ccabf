//! Type definitions for the allow-list claim system.

use crate::address::Address;
use crate::config::SecurityConfig;
use crate::error::DigestError;
use crate::utils::decode_fixed_hex;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

/// A 32-byte Keccak-256 digest.
///
/// Ordering is byte-wise, which is the same as comparing the digests as
/// big-endian unsigned integers. Sorted-pair hashing relies on it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest([u8; HASH_SIZE]);

impl Digest {
    #[must_use]
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; HASH_SIZE]> for Digest {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; HASH_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = DigestError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; HASH_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| DigestError::InvalidLength {
                expected: HASH_SIZE,
                actual: bytes.len(),
            })
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<HASH_SIZE>(s).map(Self)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A claim request as produced by the `prover` binary.
///
/// All digests and the address are kept as hex strings so that a malformed
/// file still parses and [`ClaimRequest::validate`] can say what is wrong
/// with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Claimant address as hex string (20 bytes = 40 hex chars).
    pub address: String,
    /// Leaf as hex string; must equal `keccak256(address)`.
    pub leaf: String,
    /// Allow-list root the proof was generated against.
    pub merkle_root: String,
    /// Sibling digests from leaf level to root.
    pub proof: Vec<String>,
    /// Index of the leaf in the original accounts listing
    pub leaf_index: usize,
    /// Unix timestamp when the request was generated
    pub timestamp: u64,
}

impl ClaimRequest {
    /// Validates the request structure.
    ///
    /// Checks hex encoding and byte lengths of every field, that the leaf
    /// matches the address, and that the timestamp lies inside the window
    /// given by `security`.
    ///
    /// # Errors
    /// Returns an error describing the first inconsistency found.
    pub fn validate(&self, security: &SecurityConfig) -> Result<()> {
        debug!("Starting claim request validation");
        debug!("Address: {}", self.address);
        debug!("Proof depth: {}", self.proof.len());
        debug!("Leaf index: {}", self.leaf_index);
        debug!("Timestamp: {}", self.timestamp);

        let address = self.claimant()?;
        let leaf: Digest = self.leaf.parse().map_err(|e| {
            anyhow::anyhow!(
                "Invalid leaf hex '{}': {e}. Expected {HASH_SIZE}-byte hex string.",
                self.leaf
            )
        })?;
        self.root()?;
        self.proof_path()?;

        if leaf != address.leaf() {
            return Err(anyhow::anyhow!(
                "Leaf mismatch: expected {}, got {}. The leaf must equal keccak256(address).",
                address.leaf(),
                leaf
            ));
        }

        let current_timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| anyhow::anyhow!("System clock unavailable: {}", e))?;
        debug!("Current timestamp: {}", current_timestamp);

        if self.timestamp > current_timestamp.saturating_add(security.timestamp_tolerance_secs) {
            return Err(anyhow::anyhow!(
                "Timestamp is too far in the future: {} (current: {}, tolerance: {}s)",
                self.timestamp,
                current_timestamp,
                security.timestamp_tolerance_secs
            ));
        }

        if current_timestamp > self.timestamp.saturating_add(security.timestamp_max_age_secs) {
            return Err(anyhow::anyhow!(
                "Timestamp is too old: {} (current: {}, max age: {}s). Please generate a fresh request.",
                self.timestamp,
                current_timestamp,
                security.timestamp_max_age_secs
            ));
        }

        Ok(())
    }

    pub fn claimant(&self) -> Result<Address> {
        self.address
            .parse()
            .with_context(|| format!("Invalid claimant address '{}'", self.address))
    }

    pub fn root(&self) -> Result<Digest> {
        self.merkle_root
            .parse()
            .with_context(|| format!("Invalid merkle root hex '{}'", self.merkle_root))
    }

    /// Decodes the sibling list into digests.
    pub fn proof_path(&self) -> Result<Vec<Digest>> {
        self.proof
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.parse::<Digest>()
                    .with_context(|| format!("Invalid proof sibling {i} '{s}'"))
            })
            .collect()
    }
}
