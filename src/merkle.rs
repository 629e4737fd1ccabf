//! Allow-list tree construction.
//!
//! Builds a binary Merkle tree with sorted-pair Keccak hashing so that the
//! proofs it hands out verify with [`crate::verifier::verify`]. This is the
//! off-ledger side of the system: the claim ledger only ever sees the root
//! and per-claimant sibling paths.

use crate::address::Address;
use crate::error::TreeError;
use crate::types::Digest;
use crate::verifier::{hash_pair, verify};
use std::collections::HashMap;
use std::fmt;

/// A Merkle proof for leaf inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    pub leaf: Digest,
    pub root: Digest,
    pub siblings: Vec<Digest>,
    pub index: usize,
}

/// A binary Merkle tree over allow-list leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    pub root: Digest,
    pub leaves: Vec<Digest>,
}

fn next_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            [single] => *single,
            _ => unreachable!("chunks(2) yields one or two elements"),
        })
        .collect()
}

impl MerkleTree {
    /// Create a new Merkle tree from a list of leaves.
    ///
    /// An unpaired node at the end of a level is carried up unchanged.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyInput`] if `leaves` is empty.
    pub fn new(leaves: Vec<Digest>) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::EmptyInput);
        }

        let mut level = leaves.clone();
        while level.len() > 1 {
            level = next_level(&level);
        }

        Ok(MerkleTree {
            root: level[0],
            leaves,
        })
    }

    /// Build the tree for a list of claimant addresses.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyInput`] for an empty list and
    /// [`TreeError::DuplicateLeaf`] if an address appears twice.
    pub fn from_addresses(addresses: &[Address]) -> Result<Self, TreeError> {
        let mut seen: HashMap<Address, usize> = HashMap::with_capacity(addresses.len());
        for (index, address) in addresses.iter().enumerate() {
            if let Some(&first) = seen.get(address) {
                return Err(TreeError::DuplicateLeaf { index, first });
            }
            seen.insert(*address, index);
        }
        Self::new(addresses.iter().map(Address::leaf).collect())
    }

    /// Generate a Merkle proof for a leaf at the given index.
    ///
    /// Returns `None` if the index is out of range.
    pub fn generate_proof(&self, leaf_index: usize) -> Option<MerkleProof> {
        if leaf_index >= self.leaves.len() {
            return None;
        }

        let mut siblings = Vec::new();
        let mut level = self.leaves.clone();
        let mut index = leaf_index;

        while level.len() > 1 {
            let sibling_index = index ^ 1;
            // a promoted node has no sibling at this level
            if sibling_index < level.len() {
                siblings.push(level[sibling_index]);
            }
            level = next_level(&level);
            index /= 2;
        }

        Some(MerkleProof {
            leaf: self.leaves[leaf_index],
            root: self.root,
            siblings,
            index: leaf_index,
        })
    }

    /// Verify a Merkle proof against this tree's root.
    pub fn verify_proof(&self, proof: &MerkleProof) -> bool {
        proof.root == self.root && verify(&proof.leaf, &self.root, &proof.siblings)
    }

    /// Depth of the tree, i.e. the longest proof it can produce.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut width = self.leaves.len();
        let mut depth = 0;
        while width > 1 {
            width = width.div_ceil(2);
            depth += 1;
        }
        depth
    }
}

impl fmt::Display for MerkleProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MerkleProof:\n  Leaf: {}\n  Root: {}\n  Index: {}\n  Siblings: {}",
            self.leaf,
            self.root,
            self.index,
            self.siblings.len()
        )
    }
}
