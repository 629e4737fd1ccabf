//! Claimant identities and address normalization.
//!
//! An identity is a 20-byte account address. Addresses are accepted as hex
//! with or without a `0x` prefix, in any case, and always rendered as
//! lowercase `0x`-prefixed hex.

use crate::error::DigestError;
use crate::types::Digest;
use crate::utils::{decode_fixed_hex, keccak256};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// A claimant identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// The allow-list leaf for this identity: `keccak256(address)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use merkle_allowlist::address::Address;
    ///
    /// let a: Address = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".parse().unwrap();
    /// assert_eq!(a.leaf(), a.leaf());
    /// assert_ne!(a.leaf(), Address::default().leaf());
    /// ```
    #[must_use]
    pub fn leaf(&self) -> Digest {
        Digest::new(keccak256(&[&self.0]))
    }

    /// Index of the claim shard this address is stored in.
    #[inline]
    pub(crate) fn shard(&self, shards: usize) -> usize {
        self.0[0] as usize % shards
    }
}

impl FromStr for Address {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<ADDRESS_SIZE>(s).map(Self)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = DigestError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ADDRESS_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| DigestError::InvalidLength {
                expected: ADDRESS_SIZE,
                actual: bytes.len(),
            })
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses an accounts listing: one address per line.
///
/// Blank lines and lines starting with `#` are skipped. Line numbers in
/// errors refer to the original input.
pub fn parse_accounts(content: &str) -> Result<Vec<Address>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(i, line)| {
            line.parse::<Address>()
                .with_context(|| format!("Failed to parse address at line {}: '{}'", i + 1, line))
        })
        .collect()
}
