//! Hex decoding and Keccak hashing helpers.

use crate::error::DigestError;
use sha3::{Digest as _, Keccak256};

pub(crate) fn strip_hex_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Decodes a hex string (optional `0x` prefix) into exactly `N` bytes.
pub(crate) fn decode_fixed_hex<const N: usize>(input: &str) -> Result<[u8; N], DigestError> {
    let stripped = strip_hex_prefix(input);
    if stripped.len() != N * 2 {
        return Err(DigestError::InvalidLength {
            expected: N,
            actual: stripped.len() / 2,
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(stripped, &mut out).map_err(|e| DigestError::InvalidHex(e.to_string()))?;
    Ok(out)
}

/// Keccak-256 over the concatenation of `parts`.
///
/// # Example
///
/// ```
/// use merkle_allowlist::utils::keccak256;
///
/// let empty = keccak256(&[]);
/// assert_eq!(
///     hex::encode(empty),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
#[inline]
#[must_use]
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
