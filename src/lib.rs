//! Merkle Allow-list Claims
//!
//! This library verifies Merkle inclusion proofs for an allow-list and
//! records, at most once per address, that a listed address has claimed.
//!
//! # Components
//!
//! - [`verify`]: sorted-pair Keccak-256 inclusion proof verification
//! - [`AllowlistClaim`]: claim ledger bound to a fixed Merkle root
//! - [`MerkleTree`]: builder that produces roots and sibling paths for an allow-list
//! - [`ClaimStore`]: append-only file recording claimed addresses
//! - [`ClaimRequest`]: serialized claim request format
//!
//! # Example
//!
//! ```
//! use merkle_allowlist::{Address, AllowlistClaim, ClaimError, MerkleTree};
//!
//! let accounts: Vec<Address> = (1..=4u8).map(|i| Address::new([i; 20])).collect();
//! let tree = MerkleTree::from_addresses(&accounts).unwrap();
//! let proof = tree.generate_proof(0).unwrap();
//!
//! let ledger = AllowlistClaim::new(tree.root);
//! assert!(ledger.claim(&accounts[0], &proof.siblings).is_ok());
//! assert_eq!(
//!     ledger.claim(&accounts[0], &proof.siblings),
//!     Err(ClaimError::AlreadyClaimed(accounts[0]))
//! );
//! ```

pub mod address;
pub mod claim;
pub mod config;
pub mod error;
pub mod merkle;
pub mod store;
pub mod types;
pub mod utils;
pub mod verifier;

#[cfg(test)]
mod merkle_tests;

pub use address::Address;
pub use claim::AllowlistClaim;
pub use config::Config;
pub use error::{ClaimError, DigestError, TreeError};
pub use merkle::{MerkleProof, MerkleTree};
pub use store::{ClaimStore, StoreLock};
pub use types::{ClaimRequest, Digest, HASH_SIZE};
pub use verifier::{hash_pair, process_proof, verify};
