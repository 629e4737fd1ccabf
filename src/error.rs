//! Error types for digest parsing, tree construction and claiming.

use crate::address::Address;
use thiserror::Error;

/// Errors raised when a value cannot be turned into a fixed-width byte type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("Invalid input length: expected {expected} bytes, got {actual} bytes")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Invalid hex input: {0}")]
    InvalidHex(String),
}

/// Errors raised while building an allow-list tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Empty input provided")]
    EmptyInput,
    #[error("Duplicate leaf at index {index} (first seen at index {first})")]
    DuplicateLeaf { index: usize, first: usize },
}

/// Reasons a claim is refused.
///
/// Both variants leave the ledger untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// The identity has already claimed; resubmitting will never succeed.
    #[error("Address {0} has already claimed")]
    AlreadyClaimed(Address),
    /// The proof does not reconstruct the committed root for this identity.
    #[error("Proof for address {0} does not verify against the allow-list root")]
    InvalidProof(Address),
}
